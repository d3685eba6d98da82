use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use rust_decimal::Decimal;

use crate::models::SummaryRecord;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    render_table(f, chunks[0], app);
    render_detail(f, chunks[1], app.selected_summary());
}

fn titled_block(title: String) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            title,
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ))
}

fn render_table(f: &mut Frame, area: Rect, app: &App) {
    if app.summaries.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled("No uploads yet", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Analyze a statement with :upload <path>",
                theme::dim_style(),
            )),
        ];
        f.render_widget(
            Paragraph::new(msg)
                .centered()
                .block(titled_block(" History (0) ".into())),
            area,
        );
        return;
    }

    let header_cells = ["#", "Uploaded", "File", "Bank", "Risk"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .summaries
        .iter()
        .enumerate()
        .skip(app.summary_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, s)| {
            let style = if i == app.summary_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };
            let flag_cell = if i == app.summary_index {
                Cell::from(s.risk_flag.as_str())
            } else {
                Cell::from(Span::styled(s.risk_flag.as_str(), theme::risk_style(s.risk_flag)))
            };

            Row::new(vec![
                Cell::from(s.id.unwrap_or(0).to_string()),
                Cell::from(uploaded_label(&s.uploaded_at)),
                Cell::from(truncate(&s.filename, 28)),
                Cell::from(s.bank_name.clone()),
                flag_cell,
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(5),
        Constraint::Length(17),
        Constraint::Min(12),
        Constraint::Length(6),
        Constraint::Length(19),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(titled_block(format!(" History ({}) ", app.summaries.len())));
    f.render_widget(table, area);
}

fn render_detail(f: &mut Frame, area: Rect, summary: Option<&SummaryRecord>) {
    let Some(s) = summary else {
        f.render_widget(titled_block(" Summary ".into()), area);
        return;
    };

    let net = s.net();
    let net_style = if net >= Decimal::ZERO {
        theme::income_style()
    } else {
        theme::expense_style()
    };

    let lines = vec![
        Line::from(""),
        detail_line("Bank", Span::styled(s.bank_name.clone(), theme::normal_style())),
        detail_line("File", Span::styled(s.filename.clone(), theme::normal_style())),
        detail_line(
            "Uploaded",
            Span::styled(uploaded_label(&s.uploaded_at), theme::dim_style()),
        ),
        Line::from(""),
        detail_line(
            "Total income",
            Span::styled(format_amount(s.total_income), theme::income_style()),
        ),
        detail_line(
            "Total expense",
            Span::styled(format_amount(s.total_expense), theme::expense_style()),
        ),
        detail_line("Net", Span::styled(format_amount(net), net_style)),
        Line::from(""),
        detail_line(
            "Avg monthly in",
            Span::styled(format_amount(s.avg_monthly_income), theme::normal_style()),
        ),
        detail_line(
            "Avg monthly out",
            Span::styled(format_amount(s.avg_monthly_expense), theme::normal_style()),
        ),
        Line::from(""),
        detail_line(
            "Risk",
            Span::styled(s.risk_flag.as_str(), theme::risk_style(s.risk_flag)),
        ),
    ];

    let title = format!(" Summary #{} ", s.id.unwrap_or(0));
    f.render_widget(Paragraph::new(lines).block(titled_block(title)), area);
}

fn detail_line<'a>(label: &'a str, value: Span<'a>) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {label:<16}"), theme::dim_style()),
        value,
    ])
}

/// `2024-03-05T14:02:11.123456Z` → `2024-03-05 14:02` in local time.
fn uploaded_label(rfc3339: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(rfc3339)
        .map(|dt| {
            dt.with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M")
                .to_string()
        })
        .unwrap_or_else(|_| rfc3339.to_string())
}
