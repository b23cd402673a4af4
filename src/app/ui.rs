//! Terminal UI rendering — header, form card, preview card, activity strip.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::constants::{PREVIEW_BANNER, PREVIEW_PLACEHOLDER, SUBTITLE, TEXT_AREA_ROWS, TITLE};

use super::App;
use super::focus::Focus;
use super::input::line_col;
use super::preview::{AgentPreview, Preview};

/// Cards sit side by side from this width down; narrower terminals stack them.
const WIDE_LAYOUT: u16 = 100;
/// Width of the focus marker in front of every form row.
const MARKER_WIDTH: usize = 2;

impl App {
    /// Render the full TUI frame.
    pub fn draw(&mut self, frame: &mut Frame<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2),
                Constraint::Min(8),
                Constraint::Length(6),
                Constraint::Length(1),
            ])
            .split(frame.area());

        // ── Header ───────────────────────────────────────────────────
        let header = Paragraph::new(vec![
            Line::from(Span::styled(
                TITLE,
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(SUBTITLE, Style::default().fg(Color::DarkGray))),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(header, chunks[0]);

        // ── Cards ────────────────────────────────────────────────────
        let direction = if chunks[1].width >= WIDE_LAYOUT {
            Direction::Horizontal
        } else {
            Direction::Vertical
        };
        let cards = Layout::default()
            .direction(direction)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);
        self.draw_form(frame, cards[0]);
        self.draw_preview(frame, cards[1]);

        // ── Activity log ─────────────────────────────────────────────
        self.draw_activity(frame, chunks[2]);

        // ── Key hints ────────────────────────────────────────────────
        let hints = Line::from(vec![
            Span::styled("Tab", Style::default().fg(Color::Yellow)),
            Span::styled(" move  ", Style::default().fg(Color::DarkGray)),
            Span::styled("Enter", Style::default().fg(Color::Yellow)),
            Span::styled(" press  ", Style::default().fg(Color::DarkGray)),
            Span::styled("^P", Style::default().fg(Color::Yellow)),
            Span::styled(" preview  ", Style::default().fg(Color::DarkGray)),
            Span::styled("^S", Style::default().fg(Color::Yellow)),
            Span::styled(" save  ", Style::default().fg(Color::DarkGray)),
            Span::styled("^L", Style::default().fg(Color::Yellow)),
            Span::styled(" clear log  ", Style::default().fg(Color::DarkGray)),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::styled(" quit", Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(Paragraph::new(hints), chunks[3]);
    }

    fn draw_form(&mut self, frame: &mut Frame<'_>, area: Rect) {
        let inner_width = area.width.saturating_sub(2) as usize;
        let inner_height = area.height.saturating_sub(2) as usize;
        let view = self.form_view(inner_width);

        self.form_scroll = scroll_to_show(self.form_scroll, view.focus_rows, inner_height);
        let scroll = self.form_scroll as usize;

        let panel = Paragraph::new(view.lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(" ⚙ Agent Configuration "),
            )
            .scroll((self.form_scroll, 0));
        frame.render_widget(panel, area);

        if let Some((row, col)) = view.cursor {
            if row >= scroll && row < scroll + inner_height {
                frame.set_cursor_position(Position::new(
                    area.x + 1 + col,
                    area.y + 1 + (row - scroll) as u16,
                ));
            }
        }
    }

    /// Lay out every form row for an inner width of `width` columns.
    pub(crate) fn form_view(&self, width: usize) -> FormView {
        let mut view = FormView::new(self.focus, self.cursor, width);
        let config = &self.config;

        view.label("Agent Name");
        view.input(Focus::Name, &config.name, "Enter agent name...");
        view.blank();

        view.label("Description");
        view.text_area(
            Focus::Description,
            &config.description,
            "Describe your agent's purpose...",
        );
        view.blank();

        view.label("Capabilities");
        for (i, capability) in config.capabilities.iter().enumerate() {
            view.input(Focus::Capability(i), capability, "Enter capability...");
        }
        view.link(Focus::AddCapability, "+ Add Capability");
        view.blank();

        view.label("Personality");
        view.text_area(
            Focus::Personality,
            &config.personality,
            "Define your agent's personality...",
        );
        view.blank();

        view.label("Goals");
        for (i, goal) in config.goals.iter().enumerate() {
            view.input(Focus::Goal(i), goal, "Enter goal...");
        }
        view.link(Focus::AddGoal, "+ Add Goal");
        view.blank();

        view.buttons(&[
            (Focus::Preview, " ▶ Preview Agent ", Color::Blue),
            (Focus::Save, " ■ Save Agent ", Color::Green),
        ]);
        view
    }

    fn draw_preview(&self, frame: &mut Frame<'_>, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" ✦ Agent Preview ");

        let panel = match Preview::of(&self.config, self.show_preview) {
            Preview::Placeholder => Paragraph::new(vec![
                Line::default(),
                Line::from(Span::styled("↻", Style::default().fg(Color::DarkGray))),
                Line::default(),
                Line::from(Span::styled(
                    PREVIEW_PLACEHOLDER,
                    Style::default().fg(Color::DarkGray),
                )),
            ])
            .alignment(Alignment::Center),
            Preview::Agent(preview) => Paragraph::new(preview_text(&preview)),
        };

        frame.render_widget(
            panel.block(block).wrap(Wrap { trim: false }),
            area,
        );
    }

    fn draw_activity(&self, frame: &mut Frame<'_>, area: Rect) {
        let inner_width = area.width.saturating_sub(2);
        let inner_height = area.height.saturating_sub(2) as usize;

        let log_lines: Vec<Line> = self.logs.iter().map(|l| l.render()).collect();
        let log_paragraph = Paragraph::new(Text::from(log_lines)).wrap(Wrap { trim: true });

        // Pin to the newest entries.
        let total_visual = log_paragraph.line_count(inner_width);
        let top_row = total_visual.saturating_sub(inner_height) as u16;

        let log_panel = log_paragraph
            .block(Block::default().borders(Borders::ALL).title(" Activity "))
            .scroll((top_row, 0));
        frame.render_widget(log_panel, area);
    }
}

// ── Preview body ─────────────────────────────────────────────────────

fn preview_text(preview: &AgentPreview<'_>) -> Text<'static> {
    let heading = Style::default().add_modifier(Modifier::BOLD);
    let body = Style::default().fg(Color::Gray);

    let mut lines = vec![Line::from(Span::styled(
        preview.name.to_string(),
        heading.fg(Color::Cyan),
    ))];
    lines.extend(
        preview
            .description
            .split('\n')
            .map(|l| Line::from(Span::styled(l.to_string(), body))),
    );

    lines.push(Line::default());
    lines.push(Line::from(Span::styled("Capabilities:", heading)));
    lines.extend(preview.capabilities.iter().map(|c| bullet(c)));

    lines.push(Line::default());
    lines.push(Line::from(Span::styled("Personality:", heading)));
    lines.extend(
        preview
            .personality
            .split('\n')
            .map(|l| Line::from(Span::styled(l.to_string(), body))),
    );

    lines.push(Line::default());
    lines.push(Line::from(Span::styled("Goals:", heading)));
    lines.extend(preview.goals.iter().map(|g| bullet(g)));

    lines.push(Line::default());
    lines.push(Line::from(vec![
        Span::styled("ℹ ", Style::default().fg(Color::Blue)),
        Span::styled(PREVIEW_BANNER, Style::default().fg(Color::Blue)),
    ]));
    Text::from(lines)
}

fn bullet(item: &str) -> Line<'static> {
    Line::from(vec![Span::raw("  • "), Span::raw(item.to_string())])
}

// ── Form layout ──────────────────────────────────────────────────────

/// Rendered form rows plus where the focus and cursor landed.
pub(crate) struct FormView {
    focus: Focus,
    text_cursor: usize,
    width: usize,
    pub(crate) lines: Vec<Line<'static>>,
    /// First and last row of the focused element.
    pub(crate) focus_rows: (usize, usize),
    /// `(row, column)` of the text cursor inside the card, for inputs.
    pub(crate) cursor: Option<(usize, u16)>,
}

impl FormView {
    fn new(focus: Focus, text_cursor: usize, width: usize) -> Self {
        Self {
            focus,
            text_cursor,
            width,
            lines: Vec::new(),
            focus_rows: (0, 0),
            cursor: None,
        }
    }

    fn label(&mut self, text: &'static str) {
        self.lines.push(Line::from(Span::styled(
            text,
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::BOLD),
        )));
    }

    fn blank(&mut self) {
        self.lines.push(Line::default());
    }

    fn marker(focused: bool) -> Span<'static> {
        if focused {
            Span::styled("▌ ", Style::default().fg(Color::Yellow))
        } else {
            Span::styled("│ ", Style::default().fg(Color::DarkGray))
        }
    }

    /// One visual input row.  `cursor_col` is the cursor's character index
    /// within `content` when this row holds the cursor.
    fn row(
        &mut self,
        focused: bool,
        content: &str,
        placeholder: Option<&'static str>,
        cursor_col: Option<usize>,
    ) {
        let row = self.lines.len();
        let mut spans = vec![Self::marker(focused)];

        if let Some(placeholder) = placeholder.filter(|_| content.is_empty()) {
            spans.push(Span::styled(placeholder, Style::default().fg(Color::DarkGray)));
            if cursor_col.is_some() {
                self.cursor = Some((row, MARKER_WIDTH as u16));
            }
            self.lines.push(Line::from(spans));
            return;
        }

        // Scroll long lines horizontally so the cursor stays in view.  The
        // window is measured in display columns; wide glyphs take two.
        let avail = self.width.saturating_sub(MARKER_WIDTH + 1).max(1);
        let mut offset = 0;
        if let Some(col) = cursor_col {
            let before: Vec<char> = content.chars().take(col).collect();
            let mut width: usize = before.iter().map(|&ch| char_width(ch)).sum();
            while width > avail && offset < before.len() {
                width -= char_width(before[offset]);
                offset += 1;
            }
            self.cursor = Some((row, (MARKER_WIDTH + width) as u16));
        }
        let visible: String = content.chars().skip(offset).collect();

        let style = if focused {
            Style::default().fg(Color::White)
        } else {
            Style::default()
        };
        spans.push(Span::styled(visible, style));
        self.lines.push(Line::from(spans));
    }

    fn input(&mut self, focus: Focus, text: &str, placeholder: &'static str) {
        let focused = self.focus == focus;
        if focused {
            let row = self.lines.len();
            self.focus_rows = (row, row);
        }
        let cursor_col = focused.then_some(self.text_cursor);
        self.row(focused, text, Some(placeholder), cursor_col);
    }

    fn text_area(&mut self, focus: Focus, text: &str, placeholder: &'static str) {
        let focused = self.focus == focus;
        let rows = TEXT_AREA_ROWS as usize;
        let lines: Vec<&str> = text.split('\n').collect();

        let (cursor_row, cursor_col) = line_col(text, self.text_cursor);
        let start = if focused {
            cursor_row.saturating_sub(rows - 1)
        } else {
            0
        };

        let first = self.lines.len();
        for r in start..start + rows {
            let content = lines.get(r).copied().unwrap_or("");
            let placeholder = (r == 0).then_some(placeholder).filter(|_| text.is_empty());
            let cursor = (focused && r == cursor_row).then_some(cursor_col);
            self.row(focused, content, placeholder, cursor);
        }
        if focused {
            self.focus_rows = (first, self.lines.len() - 1);
        }
    }

    fn link(&mut self, focus: Focus, label: &'static str) {
        let focused = self.focus == focus;
        if focused {
            let row = self.lines.len();
            self.focus_rows = (row, row);
        }
        let mut style = Style::default().fg(Color::LightBlue);
        if focused {
            style = style.add_modifier(Modifier::REVERSED);
        }
        self.lines.push(Line::from(vec![
            Span::raw(" ".repeat(MARKER_WIDTH)),
            Span::styled(label, style),
        ]));
    }

    fn buttons(&mut self, buttons: &[(Focus, &'static str, Color)]) {
        let row = self.lines.len();
        let mut spans = vec![Span::raw(" ".repeat(MARKER_WIDTH))];
        for (i, (focus, label, color)) in buttons.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            let mut style = Style::default().fg(Color::White).bg(*color);
            if self.focus == *focus {
                self.focus_rows = (row, row);
                style = style
                    .add_modifier(Modifier::BOLD)
                    .add_modifier(Modifier::UNDERLINED);
            }
            spans.push(Span::styled(*label, style));
        }
        self.lines.push(Line::from(spans));
    }
}

fn char_width(ch: char) -> usize {
    let mut buf = [0u8; 4];
    Span::raw(&*ch.encode_utf8(&mut buf)).width()
}

/// Smallest scroll change that keeps `rows` inside a window of `height`.
fn scroll_to_show(scroll: u16, rows: (usize, usize), height: usize) -> u16 {
    let (first, last) = rows;
    let mut top = scroll as usize;
    if height == 0 {
        return scroll;
    }
    if last >= top + height {
        top = last + 1 - height;
    }
    if first < top {
        top = first;
    }
    top as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Update;
    use crate::app::tests::{ctrl, test_app, type_str};
    use crate::constants::{NO_DESCRIPTION, UNDEFINED_CAPABILITY, UNNAMED_AGENT};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(app: &mut App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| app.draw(frame)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn fresh_app_shows_form_and_placeholder() {
        let (mut app, _tmp) = test_app();
        let screen = render(&mut app, 120, 40);
        assert!(screen.contains(TITLE));
        assert!(screen.contains("Agent Configuration"));
        assert!(screen.contains("Enter agent name..."));
        assert!(screen.contains("+ Add Capability"));
        assert!(screen.contains("Preview Agent"));
        assert!(screen.contains("Save Agent"));
        assert!(screen.contains(PREVIEW_PLACEHOLDER));
        assert!(!screen.contains(UNNAMED_AGENT));
    }

    #[test]
    fn preview_of_untouched_form() {
        let (mut app, _tmp) = test_app();
        ctrl(&mut app, 'p');
        let screen = render(&mut app, 120, 40);
        assert!(screen.contains(UNNAMED_AGENT));
        assert!(screen.contains(NO_DESCRIPTION));
        assert!(screen.contains("Capabilities:"));
        assert!(!screen.contains("  • "));
        assert!(screen.contains("This is a preview"));
        assert!(!screen.contains(PREVIEW_PLACEHOLDER));
    }

    #[test]
    fn preview_follows_edits_after_it_is_shown() {
        let (mut app, _tmp) = test_app();
        type_str(&mut app, "Help");
        ctrl(&mut app, 'p');
        let first = render(&mut app, 120, 40);
        // Once in the form, once in the preview.
        assert_eq!(first.matches("Help").count(), 2);

        type_str(&mut app, "er");
        let second = render(&mut app, 120, 40);
        assert_eq!(second.matches("Helper").count(), 2);
        assert!(second.contains(NO_DESCRIPTION));
    }

    #[test]
    fn preview_lists_capabilities_in_order() {
        let (mut app, _tmp) = test_app();
        app.dispatch(Update::AppendCapability);
        app.dispatch(Update::AppendCapability);
        app.dispatch(Update::SetCapabilityAt(1, "search".to_string()));
        ctrl(&mut app, 'p');

        let screen = render(&mut app, 120, 40);
        let undefined = screen.find(UNDEFINED_CAPABILITY).unwrap();
        let search = screen.find("• search").unwrap();
        assert!(undefined < search);
    }

    #[test]
    fn narrow_terminal_stacks_cards() {
        let (mut app, _tmp) = test_app();
        let screen = render(&mut app, 80, 60);
        let form = screen.find("Agent Configuration").unwrap();
        let preview = screen.find("Agent Preview").unwrap();
        let row_of = |idx: usize| screen[..idx].matches('\n').count();
        assert!(row_of(form) < row_of(preview));
    }

    #[test]
    fn form_scrolls_to_focused_entry() {
        let (mut app, _tmp) = test_app();
        for i in 0..25 {
            app.dispatch(Update::AppendCapability);
            app.dispatch(Update::SetCapabilityAt(i, format!("cap {i:02}")));
        }
        app.set_focus(Focus::Capability(24));

        let screen = render(&mut app, 120, 30);
        assert!(app.form_scroll > 0);
        assert!(screen.contains("cap 24"));
        assert!(!screen.contains("Enter agent name..."));
    }

    #[test]
    fn cursor_lands_after_typed_text() {
        let (mut app, _tmp) = test_app();
        type_str(&mut app, "Bob");
        let view = app.form_view(40);
        assert_eq!(view.focus_rows, (1, 1));
        assert_eq!(view.cursor, Some((1, (MARKER_WIDTH + 3) as u16)));
    }

    #[test]
    fn cursor_follows_text_area_lines() {
        let (mut app, _tmp) = test_app();
        app.set_focus(Focus::Description);
        type_str(&mut app, "ab\ncd\nef\ngh");
        let view = app.form_view(40);
        // Four lines in a three-row area: the window starts at line 1.
        let (first, last) = view.focus_rows;
        assert_eq!(last - first + 1, TEXT_AREA_ROWS as usize);
        assert_eq!(view.cursor, Some((last, (MARKER_WIDTH + 2) as u16)));
    }

    #[test]
    fn long_input_scrolls_horizontally() {
        let (mut app, _tmp) = test_app();
        type_str(&mut app, &"x".repeat(50));
        let view = app.form_view(20);
        let (_, col) = view.cursor.unwrap();
        assert!((col as usize) < 20);
    }

    #[test]
    fn wide_characters_keep_cursor_inside_the_card() {
        let (mut app, _tmp) = test_app();
        type_str(&mut app, &"界".repeat(30));
        let view = app.form_view(20);
        let (row, col) = view.cursor.unwrap();
        assert!((col as usize) < 20, "cursor at column {col}");

        // The visible tail plus the marker fits the card as well.
        let shown = view.lines[row].width();
        assert!(shown <= 20, "row is {shown} columns wide");
        assert_eq!(col as usize, shown);
    }

    #[test]
    fn wide_characters_mid_line_scroll_by_width() {
        let (mut app, _tmp) = test_app();
        type_str(&mut app, &format!("{}abc", "界".repeat(12)));
        app.move_cursor_home();
        let view = app.form_view(20);
        assert_eq!(view.cursor, Some((1, MARKER_WIDTH as u16)));

        app.move_cursor_end();
        let view = app.form_view(20);
        let (_, col) = view.cursor.unwrap();
        assert!((col as usize) < 20);
    }

    #[test]
    fn scroll_to_show_moves_minimally() {
        assert_eq!(scroll_to_show(0, (3, 3), 10), 0);
        assert_eq!(scroll_to_show(0, (12, 14), 10), 5);
        assert_eq!(scroll_to_show(8, (2, 2), 10), 2);
        assert_eq!(scroll_to_show(4, (0, 0), 0), 4);
    }
}
