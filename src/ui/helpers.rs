use anyhow::Error;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

/// Footer hint line: each key is highlighted, followed by its action.
pub(crate) fn key_hints(pairs: &[(&str, &str)]) -> Line<'static> {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let mut spans = Vec::with_capacity(pairs.len() * 2);
    for (idx, (key, action)) in pairs.iter().enumerate() {
        spans.push(Span::styled(format!("[{key}]"), key_style));
        let gap = if idx + 1 == pairs.len() { "" } else { "   " };
        spans.push(Span::raw(format!(" {action}{gap}")));
    }
    Line::from(spans)
}

/// Two-line body for a headline statistic: the value in bold over its label.
pub(crate) fn stat_lines(value: String, label: &str) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            value,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            label.to_string(),
            Style::default().fg(Color::Gray),
        )),
    ]
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Context};

    #[test]
    fn surface_error_reports_root_cause() {
        let err = Err::<(), _>(anyhow!("permission denied"))
            .context("failed to open artwork")
            .unwrap_err();
        assert_eq!(surface_error(&err), "permission denied");
    }

    #[test]
    fn key_hints_render_every_pair() {
        let line = key_hints(&[("a", "All"), ("q", "Quit")]);
        let text: String = line.spans.iter().map(|span| span.content.as_ref()).collect();
        assert_eq!(text, "[a] All   [q] Quit");
    }
}
