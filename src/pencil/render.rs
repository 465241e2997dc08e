//! Pencilsmith rendering. Reads a [`Snapshot`], never the live state.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph};
use ratzilla::ratatui::Frame;

use crate::click::{is_narrow_layout, ClickState, ClickableList};
use crate::format::{format_count, format_money, format_percent};

use super::actions::{upgrade_key, CONFIRM_KEY, RESET_KEY};
use super::state::{Snapshot, UpgradeStatus, UpgradeView};

pub fn render(
    snap: &Snapshot,
    confirm_reset: bool,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(10)])
        .split(area);

    render_title(confirm_reset, f, chunks[0], click_state);

    if is_narrow_layout(area.width) {
        let body = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(14),
                Constraint::Length(9),
                Constraint::Min(5),
            ])
            .split(chunks[1]);
        render_stats(snap, f, body[0]);
        render_actions(snap, f, body[1], click_state);
        render_upgrades(snap, f, body[2], click_state);
    } else {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(chunks[1]);
        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(14), Constraint::Min(9)])
            .split(columns[0]);
        render_stats(snap, f, left[0]);
        render_actions(snap, f, left[1], click_state);
        render_upgrades(snap, f, columns[1], click_state);
    }
}

fn render_title(
    confirm_reset: bool,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let line = if confirm_reset {
        Line::from(Span::styled(
            format!(
                "Reset game and clear save? [{}] yes / any other key: cancel",
                CONFIRM_KEY.to_ascii_uppercase()
            ),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(Span::styled(
            "✏ Pencilsmith",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
    };
    let title = Paragraph::new(line)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .alignment(Alignment::Center);
    f.render_widget(title, area);

    if confirm_reset {
        let mut cs = click_state.borrow_mut();
        for row in area.y..area.y + area.height {
            cs.add_target(row, CONFIRM_KEY);
        }
    }
}

fn stat_line(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {:<12}", label), Style::default().fg(Color::Gray)),
        Span::styled(value, Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
    ])
}

fn stats_lines(snap: &Snapshot) -> Vec<Line<'static>> {
    let mut lines = vec![
        stat_line("Pencils", format_count(snap.pencils)),
        stat_line("Inventory", format_count(snap.inventory)),
        stat_line("Funds", format!("${}", format_money(snap.funds))),
        stat_line("Per second", format!("{:.1}", snap.per_sec)),
        stat_line("Price", format!("${:.2}", snap.price)),
        stat_line("Demand", format_percent(snap.demand)),
        stat_line("Workers", snap.workers.to_string()),
        stat_line("Sharpeners", snap.sharpeners.to_string()),
        stat_line("Creativity", format_count(snap.creativity)),
        stat_line("Reputation", format_count(snap.reputation)),
    ];
    if snap.automation {
        lines.push(Line::from(Span::styled(
            " Automation suite online",
            Style::default().fg(Color::Magenta),
        )));
    }
    if snap.robot_factory {
        lines.push(Line::from(Span::styled(
            " Robot factory online",
            Style::default().fg(Color::Magenta),
        )));
    }
    lines
}

fn render_stats(snap: &Snapshot, f: &mut Frame, area: Rect) {
    let widget = Paragraph::new(stats_lines(snap)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green))
            .title(" Workshop "),
    );
    f.render_widget(widget, area);
}

fn action_line(key: char, label: String, enabled: bool) -> Line<'static> {
    let (key_style, label_style) = if enabled {
        (
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            Style::default().fg(Color::White),
        )
    } else {
        (
            Style::default().fg(Color::DarkGray),
            Style::default().fg(Color::DarkGray),
        )
    };
    Line::from(vec![
        Span::styled(format!(" [{}] ", key.to_ascii_uppercase()), key_style),
        Span::styled(label, label_style),
    ])
}

fn render_actions(
    snap: &Snapshot,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let mut cl = ClickableList::new();
    cl.push_clickable(
        action_line('p', format!("Make pencil (+{})", snap.per_click), true),
        'p',
    );
    cl.push_clickable(
        action_line(
            'w',
            format!("Hire worker (${})", format_money(snap.worker_cost)),
            snap.funds >= snap.worker_cost,
        ),
        'w',
    );
    cl.push_clickable(
        action_line(
            's',
            format!("Buy sharpener (${})", format_money(snap.sharpener_cost)),
            snap.funds >= snap.sharpener_cost,
        ),
        's',
    );
    cl.push_clickable(
        action_line(
            'x',
            format!("Sell {} pencils", format_count(snap.inventory)),
            snap.inventory > 0.0,
        ),
        'x',
    );
    cl.push_clickable(action_line('+', "Raise price".to_string(), true), '+');
    cl.push_clickable(action_line('-', "Lower price".to_string(), true), '-');
    cl.push_clickable(action_line(RESET_KEY, "Reset game".to_string(), true), RESET_KEY);

    cl.register_targets(area, &mut click_state.borrow_mut());
    let widget = Paragraph::new(cl.into_lines()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Yellow))
            .title(" Actions "),
    );
    f.render_widget(widget, area);
}

/// Button label for an upgrade, as shown at the end of its line.
fn status_label(upg: &UpgradeView) -> String {
    match upg.status {
        UpgradeStatus::Bought => "Purchased".to_string(),
        UpgradeStatus::Available => "Buy".to_string(),
        UpgradeStatus::Locked => format!("Unlock at {} pencils", format_count(upg.unlocked_at)),
    }
}

fn upgrade_line(key: char, upg: &UpgradeView) -> Line<'static> {
    let (key_style, name_style, status_style) = match upg.status {
        UpgradeStatus::Bought => (
            Style::default().fg(Color::DarkGray),
            Style::default().fg(Color::Green),
            Style::default().fg(Color::Green),
        ),
        UpgradeStatus::Available if upg.purchasable => (
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            Style::default().fg(Color::Yellow),
        ),
        UpgradeStatus::Available => (
            Style::default().fg(Color::DarkGray),
            Style::default().fg(Color::White),
            Style::default().fg(Color::DarkGray),
        ),
        UpgradeStatus::Locked => (
            Style::default().fg(Color::DarkGray),
            Style::default().fg(Color::DarkGray),
            Style::default().fg(Color::DarkGray),
        ),
    };
    Line::from(vec![
        Span::styled(format!(" [{}] ", key.to_ascii_uppercase()), key_style),
        Span::styled(upg.name, name_style),
        Span::styled(
            format!(": {} (${}) ", upg.description, format_count(upg.cost)),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(status_label(upg), status_style),
    ])
}

fn render_upgrades(
    snap: &Snapshot,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let mut cl = ClickableList::new();
    for (idx, upg) in snap.upgrades.iter().enumerate() {
        if let Some(key) = upgrade_key(idx) {
            cl.push_clickable(upgrade_line(key, upg), key);
        }
    }

    cl.register_targets(area, &mut click_state.borrow_mut());
    let widget = Paragraph::new(cl.into_lines()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue))
            .title(" Upgrades "),
    );
    f.render_widget(widget, area);
}
