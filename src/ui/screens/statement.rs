use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::models::{NormalizedStatement, UploadSummary};
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, format_opt_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let (Some(statement), Some(summary)) = (&app.statement, &app.last_summary) else {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled(
                "No statement uploaded in this session",
                theme::dim_style(),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Analyze one with :upload <path>",
                theme::dim_style(),
            )),
        ];
        f.render_widget(
            Paragraph::new(msg)
                .centered()
                .block(block(" Statement ".into())),
            area,
        );
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(40)])
        .split(area);

    render_transactions(f, chunks[0], app, statement);
    render_months(f, chunks[1], summary);
}

fn block(title: String) -> Block<'static> {
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

fn render_transactions(f: &mut Frame, area: Rect, app: &App, statement: &NormalizedStatement) {
    let header_cells = ["Date", "Description", "Type", "Amount", "Balance"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = statement
        .transactions
        .iter()
        .enumerate()
        .skip(app.transaction_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, txn)| {
            let style = if i == app.transaction_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };
            let amount_style = if txn.is_income() {
                theme::income_style()
            } else if txn.is_expense() {
                theme::expense_style()
            } else {
                theme::dim_style()
            };
            let date = txn
                .date()
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_else(|| "-".into());

            Row::new(vec![
                Cell::from(date),
                Cell::from(truncate(txn.description(), 40)),
                Cell::from(txn.txn_type().as_str()),
                Cell::from(Span::styled(format_opt_amount(txn.amount()), amount_style)),
                Cell::from(format_opt_amount(txn.balance())),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(11),
        Constraint::Min(20),
        Constraint::Length(7),
        Constraint::Length(14),
        Constraint::Length(14),
    ];

    let title = format!(
        " {} ({}, {} rows) ",
        app.last_filename,
        statement.bank_name(),
        statement.len()
    );
    let table = Table::new(rows, widths).header(header).block(block(title));
    f.render_widget(table, area);
}

fn render_months(f: &mut Frame, area: Rect, summary: &UploadSummary) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(4)])
        .split(area);

    let header_cells = ["Month", "Income", "Expense"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let rows: Vec<Row> = summary
        .months
        .iter()
        .map(|m| {
            Row::new(vec![
                Cell::from(m.label()),
                Cell::from(Span::styled(format_amount(m.income), theme::income_style())),
                Cell::from(Span::styled(format_amount(m.expense), theme::expense_style())),
            ])
        })
        .collect();
    let widths = [
        Constraint::Length(8),
        Constraint::Length(14),
        Constraint::Length(14),
    ];
    let table = Table::new(rows, widths)
        .header(Row::new(header_cells).height(1))
        .block(block(format!(" Months ({}) ", summary.months.len())));
    f.render_widget(table, chunks[0]);

    let flag = Paragraph::new(vec![
        Line::from(Span::styled(
            summary.risk_flag.as_str(),
            theme::risk_style(summary.risk_flag),
        )),
        Line::from(Span::styled(
            format!("{} rows analyzed", summary.transaction_count),
            theme::dim_style(),
        )),
    ])
    .centered()
    .block(block(" Risk ".into()));
    f.render_widget(flag, chunks[1]);
}
