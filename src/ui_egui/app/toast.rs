//! Short-lived notifications in the bottom-right corner.
//!
//! Used for save confirmations and, more importantly, for mood entries that
//! failed to reach the database.

use egui::{Color32, Context, Pos2, RichText};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Info,
    Error,
}

impl ToastLevel {
    pub fn icon(&self) -> &'static str {
        match self {
            ToastLevel::Success => "✓",
            ToastLevel::Info => "ℹ",
            ToastLevel::Error => "✗",
        }
    }

    pub fn background_color(&self, is_dark_theme: bool) -> Color32 {
        match (self, is_dark_theme) {
            (ToastLevel::Success, true) => Color32::from_rgb(30, 70, 40),
            (ToastLevel::Info, true) => Color32::from_rgb(30, 50, 80),
            (ToastLevel::Error, true) => Color32::from_rgb(80, 30, 30),
            (ToastLevel::Success, false) => Color32::from_rgb(220, 255, 220),
            (ToastLevel::Info, false) => Color32::from_rgb(220, 235, 255),
            (ToastLevel::Error, false) => Color32::from_rgb(255, 220, 220),
        }
    }

    pub fn text_color(&self, is_dark_theme: bool) -> Color32 {
        match (self, is_dark_theme) {
            (ToastLevel::Success, true) => Color32::from_rgb(100, 220, 120),
            (ToastLevel::Info, true) => Color32::from_rgb(100, 180, 255),
            (ToastLevel::Error, true) => Color32::from_rgb(255, 120, 120),
            (ToastLevel::Success, false) => Color32::from_rgb(30, 120, 50),
            (ToastLevel::Info, false) => Color32::from_rgb(30, 80, 150),
            (ToastLevel::Error, false) => Color32::from_rgb(180, 40, 40),
        }
    }

    fn lifetime(&self) -> Duration {
        match self {
            // Failed saves stay up long enough to be read
            ToastLevel::Error => Duration::from_secs(6),
            ToastLevel::Success | ToastLevel::Info => Duration::from_secs(3),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub level: ToastLevel,
    pub created_at: Instant,
    pub duration: Duration,
}

impl Toast {
    pub fn new(message: impl Into<String>, level: ToastLevel) -> Self {
        Self {
            message: message.into(),
            level,
            created_at: Instant::now(),
            duration: level.lifetime(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed() >= self.duration
    }

    /// Fades out over the last half second.
    pub fn opacity(&self) -> f32 {
        let elapsed = self.created_at.elapsed();
        let fade_start = self.duration.saturating_sub(Duration::from_millis(500));

        if elapsed >= self.duration {
            0.0
        } else if elapsed >= fade_start {
            ((self.duration - elapsed).as_secs_f32() / 0.5).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }
}

#[derive(Debug, Default)]
pub struct ToastManager {
    toasts: Vec<Toast>,
}

impl ToastManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.toasts.push(Toast::new(message, ToastLevel::Success));
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.toasts.push(Toast::new(message, ToastLevel::Info));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.toasts.push(Toast::new(message, ToastLevel::Error));
    }

    pub fn render(&mut self, ctx: &Context, is_dark_theme: bool) {
        self.toasts.retain(|t| !t.is_expired());
        if self.toasts.is_empty() {
            return;
        }

        // Keep animating the fade
        ctx.request_repaint();

        let screen_rect = ctx.screen_rect();
        let toast_width = 320.0;
        let toast_height = 40.0;
        let margin = 10.0;
        let spacing = 5.0;

        for (i, toast) in self.toasts.iter().enumerate() {
            let opacity = toast.opacity();
            if opacity <= 0.0 {
                continue;
            }

            let y_offset = (i as f32) * (toast_height + spacing);
            let pos = Pos2::new(
                screen_rect.right() - toast_width - margin,
                screen_rect.bottom() - toast_height - margin - y_offset,
            );

            egui::Area::new(egui::Id::new(("toast", i)))
                .fixed_pos(pos)
                .order(egui::Order::Foreground)
                .interactable(false)
                .show(ctx, |ui| {
                    let bg_color = toast
                        .level
                        .background_color(is_dark_theme)
                        .gamma_multiply(0.9 * opacity);
                    let text_color = toast.level.text_color(is_dark_theme).gamma_multiply(opacity);

                    egui::Frame::none()
                        .fill(bg_color)
                        .rounding(6.0)
                        .inner_margin(egui::Margin::symmetric(12.0, 8.0))
                        .stroke(egui::Stroke::new(1.0, text_color.gamma_multiply(0.3)))
                        .show(ui, |ui| {
                            ui.set_min_width(toast_width - 24.0);
                            ui.horizontal(|ui| {
                                ui.label(RichText::new(toast.level.icon()).color(text_color).strong());
                                ui.label(RichText::new(&toast.message).color(text_color));
                            });
                        });
                });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_toast_is_opaque() {
        let toast = Toast::new("Saved", ToastLevel::Success);
        assert!(!toast.is_expired());
        assert_eq!(toast.opacity(), 1.0);
    }

    #[test]
    fn test_errors_outlive_confirmations() {
        assert!(ToastLevel::Error.lifetime() > ToastLevel::Success.lifetime());
    }

    #[test]
    fn test_expired_toast_is_invisible() {
        let mut toast = Toast::new("gone", ToastLevel::Info);
        toast.duration = Duration::ZERO;
        assert!(toast.is_expired());
        assert_eq!(toast.opacity(), 0.0);
    }
}
