//! Short-lived visual feedback driven by engine events.
//!
//! The engine emits [`GameEvent`]s and never waits on the front end. This
//! module turns them into a banner ("DOUBLE +30", "LEVEL 3") that fades out on
//! its own clock.

use crate::core::GameEvent;

/// How long a banner stays up.
pub const BANNER_MS: u32 = 1500;

#[derive(Debug, Clone, PartialEq)]
struct Banner {
    text: String,
    remaining_ms: u32,
}

#[derive(Debug, Clone, Default)]
pub struct Effects {
    banner: Option<Banner>,
}

impl Effects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&mut self, event: &GameEvent) {
        match event {
            GameEvent::LinesCleared { rows, points } => {
                self.show(format!("{} +{}", clear_name(rows.len()), points));
            }
            GameEvent::LevelUp { level } => self.show(format!("LEVEL {}", level)),
            GameEvent::GameOver { .. } | GameEvent::Restarted => self.banner = None,
            GameEvent::PieceLocked { .. } => {}
        }
    }

    fn show(&mut self, text: String) {
        self.banner = Some(Banner {
            text,
            remaining_ms: BANNER_MS,
        });
    }

    pub fn update(&mut self, elapsed_ms: u32) {
        if let Some(banner) = self.banner.as_mut() {
            banner.remaining_ms = banner.remaining_ms.saturating_sub(elapsed_ms);
            if banner.remaining_ms == 0 {
                self.banner = None;
            }
        }
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_ref().map(|b| b.text.as_str())
    }

    /// Banner brightness in `[0, 1]`: full for the first half, then fading.
    pub fn intensity(&self) -> f32 {
        match &self.banner {
            Some(b) => (b.remaining_ms as f32 / (BANNER_MS as f32 / 2.0)).min(1.0),
            None => 0.0,
        }
    }
}

fn clear_name(rows: usize) -> &'static str {
    match rows {
        1 => "SINGLE",
        2 => "DOUBLE",
        3 => "TRIPLE",
        _ => "TETRIS",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_shows_banner_then_expires() {
        let mut fx = Effects::new();
        fx.handle(&GameEvent::LinesCleared {
            rows: vec![17, 18],
            points: 30,
        });
        assert_eq!(fx.banner(), Some("DOUBLE +30"));
        assert_eq!(fx.intensity(), 1.0);

        fx.update(1125);
        assert_eq!(fx.intensity(), 0.5);
        fx.update(375);
        assert_eq!(fx.banner(), None);
    }

    #[test]
    fn later_event_replaces_banner() {
        let mut fx = Effects::new();
        fx.handle(&GameEvent::LinesCleared {
            rows: vec![16, 17, 18, 19],
            points: 100,
        });
        fx.handle(&GameEvent::LevelUp { level: 2 });
        assert_eq!(fx.banner(), Some("LEVEL 2"));
    }

    #[test]
    fn restart_clears_banner() {
        let mut fx = Effects::new();
        fx.handle(&GameEvent::LevelUp { level: 4 });
        fx.handle(&GameEvent::Restarted);
        assert_eq!(fx.banner(), None);
        assert_eq!(fx.intensity(), 0.0);
    }
}
