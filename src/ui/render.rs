use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::{Block, Paragraph},
    Frame,
};

use super::braille::{number_width, pattern_char, BrailleCanvas, DIGIT_HEIGHT};
use super::overlay::{render_overlay, OverlayMessage};
use crate::config::{DisplayConfig, KeyBindings};
use crate::game::{MatchPhase, Paddle, Playfield, Side, Snapshot};

// Layout: header with labels, scores and controls, then the bordered field
// Rows 0-4: header (braille digits are 16px tall = 4 rows, plus padding)
// Row 4 (last pixel row): top border line
// Rows 5 to N-3: field
// Row N-2 (first pixel row): bottom border line
// Row N-1: controls hint
const HEADER_ROWS: u16 = 5;
const FOOTER_ROWS: u16 = 2;

const MIN_COLUMNS: u16 = 20;
const MIN_ROWS: u16 = HEADER_ROWS + FOOTER_ROWS + 4;

/// Field area in braille pixels (origin at the top-left of the field)
#[derive(Debug, Clone, Copy)]
struct FieldPixels {
    offset_y: usize,
    width: usize,
    height: usize,
    scale_x: f32,
    scale_y: f32,
}

impl FieldPixels {
    fn new(area: Rect, playfield: Playfield) -> Self {
        let width = area.width as usize * 2;
        let height = field_rows(area.height) as usize * 4;
        Self {
            offset_y: HEADER_ROWS as usize * 4,
            width,
            height,
            scale_x: width as f32 / playfield.width,
            scale_y: height as f32 / playfield.height,
        }
    }

    /// Fill a rectangle given in field units, clipped to the field
    fn fill(&self, canvas: &mut BrailleCanvas, x: f32, y: f32, w: f32, h: f32) {
        let left = (x * self.scale_x).clamp(0.0, self.width as f32);
        let top = (y * self.scale_y).clamp(0.0, self.height as f32);
        let right = ((x + w) * self.scale_x).clamp(0.0, self.width as f32);
        let bottom = ((y + h) * self.scale_y).clamp(0.0, self.height as f32);
        if right <= left || bottom <= top {
            return;
        }

        // Anything visible gets at least one dot
        let px = left as usize;
        let py = top as usize;
        let pw = ((right - left).round() as usize).max(1);
        let ph = ((bottom - top).round() as usize).max(1);
        canvas.fill_rect(px, self.offset_y + py, pw, ph);
    }
}

fn field_rows(terminal_rows: u16) -> u16 {
    terminal_rows.saturating_sub(HEADER_ROWS + FOOTER_ROWS)
}

/// Playfield that keeps `width` and follows the terminal's field aspect ratio.
///
/// Braille dots are roughly square, so the ratio is taken in dots.
pub fn playfield_for_terminal(columns: u16, rows: u16, width: f32) -> Option<Playfield> {
    let field_height_dots = field_rows(rows) as f32 * 4.0;
    let field_width_dots = columns as f32 * 2.0;
    if columns < MIN_COLUMNS || rows < MIN_ROWS || field_height_dots <= 0.0 {
        return None;
    }
    Some(Playfield::new(width, (width * field_height_dots / field_width_dots).floor()))
}

/// One-line controls reminder built from the active bindings
pub fn controls_hint(bindings: &KeyBindings) -> String {
    format!(
        "{}/{}: P1  {}/{}: P2  {}: Start  {}: Stop  {}: Quit",
        bindings.left_paddle_up,
        bindings.left_paddle_down,
        bindings.right_paddle_up,
        bindings.right_paddle_down,
        bindings.start,
        bindings.stop,
        bindings.quit,
    )
}

pub fn render(frame: &mut Frame, snapshot: &Snapshot, display: &DisplayConfig, keys: &KeyBindings) {
    let area = frame.area();

    // True black background, not the terminal default
    let bg = Block::default().style(Style::default().bg(Color::Rgb(0, 0, 0)));
    frame.render_widget(bg, area);

    if area.width < MIN_COLUMNS || area.height < MIN_ROWS {
        let msg = Paragraph::new("Terminal too small")
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center);
        frame.render_widget(msg, area);
        return;
    }

    let columns = area.width as usize;
    let rows = area.height as usize;
    let field = FieldPixels::new(area, snapshot.playfield);

    // Separate layers so each gets its own color
    let mut scores = BrailleCanvas::new(columns, rows);
    let mut lines = BrailleCanvas::new(columns, rows);
    let mut entities = BrailleCanvas::new(columns, rows);

    draw_scores(&mut scores, snapshot);

    lines.draw_horizontal_line(field.offset_y - 1);
    lines.draw_horizontal_line(field.offset_y + field.height);
    let center_x = (snapshot.playfield.width / 2.0 * field.scale_x) as usize;
    lines.draw_dashed_vertical(center_x, field.offset_y, field.offset_y + field.height, 2, 2);

    // A finished match shows only the result
    if !matches!(snapshot.phase, MatchPhase::Over { .. }) {
        draw_paddle(&mut entities, &field, &snapshot.left_paddle);
        draw_paddle(&mut entities, &field, &snapshot.right_paddle);
        let ball = &snapshot.ball;
        field.fill(
            &mut entities,
            ball.x - ball.radius,
            ball.y - ball.radius,
            ball.radius * 2.0,
            ball.radius * 2.0,
        );
    }

    let layers = [
        (&entities, rgb(display.field_color)),
        (&scores, rgb(display.score_color)),
        (&lines, rgb(display.center_line_color)),
    ];
    draw_layers(frame, area, &layers);

    draw_labels(frame, area, &controls_hint(keys));

    let field_area = Rect {
        x: area.x,
        y: area.y + HEADER_ROWS,
        width: area.width,
        height: field_rows(area.height),
    };
    if let Some(message) = phase_overlay(snapshot, keys) {
        render_overlay(frame, &message, field_area);
    }
}

fn rgb([r, g, b]: [u8; 3]) -> Color {
    Color::Rgb(r, g, b)
}

fn draw_paddle(canvas: &mut BrailleCanvas, field: &FieldPixels, paddle: &Paddle) {
    field.fill(canvas, paddle.x, paddle.y, paddle.width, paddle.height);
}

fn draw_scores(canvas: &mut BrailleCanvas, snapshot: &Snapshot) {
    // Centered vertically in the header
    let score_y = (HEADER_ROWS as usize * 4).saturating_sub(DIGIT_HEIGHT) / 2;
    let width = canvas.pixel_width();

    let left = snapshot.score.get(Side::Left);
    let left_x = (width / 3).saturating_sub(number_width(left) / 2);
    canvas.draw_number(left, left_x, score_y);

    let right = snapshot.score.get(Side::Right);
    let right_x = (width * 2 / 3).saturating_sub(number_width(right) / 2);
    canvas.draw_number(right, right_x, score_y);
}

/// Merge layers cell by cell; the first layer with dots in a cell picks its color
fn draw_layers(frame: &mut Frame, area: Rect, layers: &[(&BrailleCanvas, Color)]) {
    let buffer = frame.buffer_mut();
    for y in 0..area.height {
        for x in 0..area.width {
            let (cx, cy) = (x as usize, y as usize);
            let pattern = layers
                .iter()
                .fold(0u8, |bits, (layer, _)| bits | layer.pattern(cx, cy));
            if pattern == 0 {
                continue;
            }
            let color = layers
                .iter()
                .find(|(layer, _)| layer.pattern(cx, cy) != 0)
                .map(|(_, color)| *color)
                .unwrap_or(Color::White);

            if let Some(cell) = buffer.cell_mut((area.x + x, area.y + y)) {
                cell.set_char(pattern_char(pattern)).set_fg(color);
            }
        }
    }
}

fn draw_labels(frame: &mut Frame, area: Rect, hint: &str) {
    let label_style = Style::default().fg(Color::Gray);
    let row = |y: u16| Rect {
        x: area.x + 2,
        y: area.y + y,
        width: area.width.saturating_sub(4),
        height: 1,
    };

    frame.render_widget(
        Paragraph::new(Side::Left.player_label()).style(label_style),
        row(2),
    );
    frame.render_widget(
        Paragraph::new(Side::Right.player_label())
            .style(label_style)
            .alignment(Alignment::Right),
        row(2),
    );

    let hint_widget = Paragraph::new(hint)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(hint_widget, row(area.height - 1));
}

/// Overlay for the current phase; none while a match is running
pub fn phase_overlay(snapshot: &Snapshot, keys: &KeyBindings) -> Option<OverlayMessage> {
    let start = keys.start.to_uppercase();
    let quit = keys.quit.to_uppercase();
    match snapshot.phase {
        MatchPhase::Playing => None,
        MatchPhase::Idle => Some(
            OverlayMessage::info(vec![
                format!("PRESS {} TO PLAY", start),
                format!("First to {} wins", snapshot.best_of),
            ])
            .with_title("DUOPONG"),
        ),
        MatchPhase::Over { winner } => Some(
            OverlayMessage::result(vec![
                winner.winner_label().to_string(),
                format!(
                    "{} - {}",
                    snapshot.score.get(Side::Left),
                    snapshot.score.get(Side::Right)
                ),
                String::new(),
                format!("{} to play again | {} to quit", start, quit),
            ])
            .with_title("MATCH OVER"),
        ),
    }
}
