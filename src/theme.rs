use ratatui::style::Color;

// Centralized desktop colors.

// Canvas / launcher
pub fn canvas_bg() -> Color {
    Color::Reset
}
pub fn launcher_bg() -> Color {
    Color::DarkGray
}
pub fn launcher_fg() -> Color {
    Color::White
}
pub fn launcher_button_bg() -> Color {
    Color::Gray
}
pub fn launcher_button_fg() -> Color {
    Color::Black
}

// Decorator
pub fn decorator_header_bg() -> Color {
    Color::Blue
}
pub fn decorator_header_fg() -> Color {
    Color::White
}
pub fn decorator_inactive_header_bg() -> Color {
    Color::DarkGray
}
pub fn decorator_border() -> Color {
    Color::DarkGray
}
pub fn decorator_close_fg() -> Color {
    Color::LightRed
}
pub fn window_bg() -> Color {
    Color::Black
}

// Memory board
pub fn card_back_bg() -> Color {
    Color::Cyan
}
pub fn card_back_fg() -> Color {
    Color::Blue
}
pub fn card_face_bg() -> Color {
    Color::White
}
pub fn card_face_fg() -> Color {
    Color::Black
}
pub fn card_matched_fg() -> Color {
    Color::Green
}
pub fn outcome_won_fg() -> Color {
    Color::LightGreen
}
pub fn outcome_lost_fg() -> Color {
    Color::LightRed
}

// Notice
pub fn dialog_bg() -> Color {
    Color::Black
}
pub fn dialog_fg() -> Color {
    Color::White
}
pub fn dialog_border() -> Color {
    Color::Yellow
}
