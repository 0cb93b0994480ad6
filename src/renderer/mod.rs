//! Canvas 2D renderer
//!
//! Pure presentation: reads a [`GameState`] snapshot each frame and draws
//! it, resolving palette indices against the active color theme. Nothing
//! here mutates the simulation.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::Settings;
use crate::sim::{GamePhase, GameState, ObstacleKind, palette};

/// A renderer-side RGB color with css formatting helpers
#[derive(Debug, Clone, Copy)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn css(&self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }

    pub fn css_alpha(&self, alpha: f32) -> String {
        format!(
            "rgba({},{},{},{:.3})",
            self.r,
            self.g,
            self.b,
            alpha.clamp(0.0, 1.0)
        )
    }

    pub fn lighten(&self, amount: u8) -> Self {
        Self {
            r: self.r.saturating_add(amount),
            g: self.g.saturating_add(amount),
            b: self.b.saturating_add(amount),
        }
    }

    pub fn darken(&self, amount: u8) -> Self {
        Self {
            r: self.r.saturating_sub(amount),
            g: self.g.saturating_sub(amount),
            b: self.b.saturating_sub(amount),
        }
    }
}

/// A selectable color theme
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub primary: Color,
    pub secondary: Color,
    pub bg: Color,
    pub sun: Color,
}

/// Built-in themes, indexed by `GameState::theme`
pub const THEMES: [Theme; 3] = [
    Theme {
        primary: Color::rgb(0xFF, 0x6B, 0x6B),
        secondary: Color::rgb(0x4E, 0xCD, 0xC4),
        bg: Color::rgb(0x64, 0xB5, 0xF6),
        sun: Color::rgb(0xFF, 0xEB, 0x3B),
    },
    Theme {
        primary: Color::rgb(0xFF, 0x9E, 0x6B),
        secondary: Color::rgb(0x6B, 0xFF, 0xD3),
        bg: Color::rgb(0xA1, 0x8C, 0xD1),
        sun: Color::rgb(0xFF, 0xD5, 0x4F),
    },
    Theme {
        primary: Color::rgb(0x6B, 0x83, 0xFF),
        secondary: Color::rgb(0xFF, 0x6B, 0xE8),
        bg: Color::rgb(0xFB, 0xC2, 0xEB),
        sun: Color::rgb(0xFF, 0xCA, 0x28),
    },
];

/// Resolve a sim palette tag to a concrete color
fn resolve(tag: u32, theme: &Theme) -> Color {
    match tag {
        palette::PRIMARY => theme.primary,
        palette::SECONDARY => theme.secondary,
        palette::WHITE => Color::rgb(0xFF, 0xFF, 0xFF),
        palette::COIN_YELLOW => Color::rgb(0xFF, 0xFF, 0x00),
        palette::COMBO_GOLD => Color::rgb(0xFF, 0xD7, 0x00),
        palette::SCORE_GREEN => Color::rgb(0x00, 0xFF, 0x00),
        _ => Color::rgb(0xFF, 0xFF, 0xFF),
    }
}

/// Canvas renderer, one per game instance
pub struct Renderer {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl Renderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, wasm_bindgen::JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()?;
        Ok(Self {
            ctx,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
        })
    }

    /// Draw one frame from a state snapshot
    pub fn render(&self, state: &GameState, settings: &Settings) {
        let theme = &THEMES[state.theme % THEMES.len()];
        let ctx = &self.ctx;

        ctx.save();
        if settings.effective_screen_shake() && state.screen_shake > 0.0 {
            let shake = state.screen_shake as f64;
            let dx = shake * (js_sys::Math::random() - 0.5) * 2.0;
            let dy = shake * (js_sys::Math::random() - 0.5) * 2.0;
            ctx.translate(dx, dy).ok();
        }

        self.draw_background(theme);
        self.draw_sun(theme);
        self.draw_ground(state);

        for coin in &state.collectibles {
            self.draw_coin(coin);
        }
        for obstacle in &state.obstacles {
            self.draw_obstacle(obstacle, theme);
        }

        if settings.trail {
            self.draw_trail(state, theme);
        }
        if state.phase != GamePhase::GameOver {
            self.draw_player(state, theme);
        }
        if settings.effective_particles() {
            for particle in &state.particles {
                let color = resolve(particle.color, theme);
                ctx.set_fill_style_str(&color.css_alpha(particle.life));
                ctx.fill_rect(
                    (particle.pos.x - particle.size / 2.0) as f64,
                    (particle.pos.y - particle.size / 2.0) as f64,
                    particle.size as f64,
                    particle.size as f64,
                );
            }
        }
        for text in &state.texts {
            let color = resolve(text.color, theme);
            ctx.set_font("bold 20px Arial");
            ctx.set_fill_style_str(&color.css_alpha(text.life));
            ctx.fill_text(&text.text, text.pos.x as f64, text.pos.y as f64)
                .ok();
        }

        ctx.restore();
    }

    fn draw_background(&self, theme: &Theme) {
        let ctx = &self.ctx;
        let gradient = ctx.create_linear_gradient(0.0, 0.0, 0.0, self.height);
        gradient
            .add_color_stop(0.0, &theme.bg.lighten(20).css())
            .ok();
        gradient.add_color_stop(0.5, &theme.bg.css()).ok();
        gradient
            .add_color_stop(1.0, &theme.bg.darken(20).css())
            .ok();
        ctx.set_fill_style_canvas_gradient(&gradient);
        ctx.fill_rect(0.0, 0.0, self.width, self.height);
    }

    fn draw_sun(&self, theme: &Theme) {
        let ctx = &self.ctx;
        let (x, y, radius) = (self.width - 80.0, 80.0, 40.0);

        ctx.begin_path();
        ctx.arc(x, y, radius, 0.0, std::f64::consts::TAU).ok();
        ctx.set_fill_style_str(&theme.sun.css());
        ctx.fill();

        // Soft glow ring
        ctx.begin_path();
        ctx.arc(x, y, radius + 14.0, 0.0, std::f64::consts::TAU).ok();
        ctx.set_fill_style_str(&theme.sun.css_alpha(0.25));
        ctx.fill();
    }

    fn draw_ground(&self, state: &GameState) {
        let ctx = &self.ctx;
        let ground_y = state.ground_y as f64;

        ctx.set_fill_style_str("#81C784");
        ctx.fill_rect(0.0, ground_y, self.width, self.height - ground_y);

        // Grass strip on top
        ctx.set_fill_style_str("#4CAF50");
        ctx.fill_rect(0.0, ground_y - 10.0, self.width, 10.0);
    }

    fn draw_coin(&self, coin: &crate::sim::Collectible) {
        let ctx = &self.ctx;
        let half = (coin.size.x / 2.0) as f64;

        ctx.save();
        ctx.translate(
            coin.pos.x as f64 + half,
            coin.pos.y as f64 + half,
        )
        .ok();
        ctx.rotate(coin.rotation as f64).ok();

        // The spin reads as a horizontal squeeze
        let squeeze = (coin.rotation.cos().abs().max(0.15)) as f64;
        ctx.set_fill_style_str("#FFD700");
        ctx.begin_path();
        ctx.ellipse(0.0, 0.0, half * squeeze, half, 0.0, 0.0, std::f64::consts::TAU)
            .ok();
        ctx.fill();
        ctx.set_stroke_style_str("#FFA000");
        ctx.set_line_width(1.5);
        ctx.stroke();

        ctx.restore();
    }

    fn draw_obstacle(&self, obstacle: &crate::sim::Obstacle, theme: &Theme) {
        let ctx = &self.ctx;
        let color = resolve(obstacle.color, theme);
        let (x, y) = (obstacle.pos.x as f64, obstacle.pos.y as f64);
        let (w, h) = (obstacle.size.x as f64, obstacle.size.y as f64);

        ctx.set_fill_style_str(&color.css());
        match obstacle.kind {
            ObstacleKind::SpikeShort | ObstacleKind::SpikeTall => {
                ctx.begin_path();
                ctx.move_to(x, y + h);
                ctx.line_to(x + w / 2.0, y);
                ctx.line_to(x + w, y + h);
                ctx.close_path();
                ctx.fill();
            }
            ObstacleKind::Platform => {
                ctx.fill_rect(x, y, w, h);
                ctx.set_stroke_style_str(&color.darken(30).css());
                ctx.set_line_width(2.0);
                ctx.stroke_rect(x, y, w, h);
            }
        }
    }

    fn draw_trail(&self, state: &GameState, theme: &Theme) {
        let ctx = &self.ctx;
        for point in &state.player.trail {
            let radius = (state.player.size as f64 / 2.0) * point.life as f64;
            ctx.begin_path();
            ctx.arc(
                point.pos.x as f64,
                point.pos.y as f64,
                radius.max(1.0),
                0.0,
                std::f64::consts::TAU,
            )
            .ok();
            ctx.set_fill_style_str(&theme.primary.css_alpha(point.life * 0.3));
            ctx.fill();
        }
    }

    fn draw_player(&self, state: &GameState, theme: &Theme) {
        let ctx = &self.ctx;
        let player = &state.player;
        let half = (player.size / 2.0) as f64;
        let center = player.center();

        ctx.save();
        ctx.translate(center.x as f64, center.y as f64).ok();
        ctx.rotate((player.rotation as f64).to_radians()).ok();
        ctx.scale(player.scale as f64, player.scale as f64).ok();

        // Body
        ctx.set_fill_style_str(&theme.primary.css());
        ctx.fill_rect(-half, -half, half * 2.0, half * 2.0);
        ctx.set_stroke_style_str(&theme.primary.darken(30).css());
        ctx.set_line_width(2.0);
        ctx.stroke_rect(-half, -half, half * 2.0, half * 2.0);

        // Eyes, nudged up a little when happy
        let happy_offset = (player.happy * 5.0) as f64;
        let eye_y = -half / 2.0 + happy_offset;
        let sparkle = (player.eye_sparkle.sin() * 0.5 + 0.5) > 0.8;
        for eye_x in [-half / 2.0, half / 2.0 - 2.0] {
            ctx.set_fill_style_str("#FFFFFF");
            ctx.begin_path();
            ctx.arc(eye_x, eye_y, 5.0, 0.0, std::f64::consts::TAU).ok();
            ctx.fill();
            ctx.set_fill_style_str("#2196F3");
            ctx.begin_path();
            ctx.arc(eye_x, eye_y, 3.0, 0.0, std::f64::consts::TAU).ok();
            ctx.fill();
            ctx.set_fill_style_str("#000000");
            ctx.begin_path();
            ctx.arc(eye_x, eye_y, 1.5, 0.0, std::f64::consts::TAU).ok();
            ctx.fill();
            if sparkle {
                ctx.set_fill_style_str("#FFFFFF");
                ctx.begin_path();
                ctx.arc(eye_x - 1.0, eye_y - 1.0, 0.8, 0.0, std::f64::consts::TAU)
                    .ok();
                ctx.fill();
            }
        }

        // Mouth: forced open, emotional, or idle chewing cycle
        let mouth_y = half / 3.0 + happy_offset;
        ctx.set_fill_style_str("#000000");
        if player.mouth_ticks > 0 {
            ctx.begin_path();
            ctx.arc(0.0, mouth_y + 2.0, half / 3.0, 0.0, std::f64::consts::PI)
                .ok();
            ctx.fill();
        } else if player.happy > 0.0 {
            ctx.begin_path();
            ctx.arc(0.0, mouth_y + 3.0, half / 2.5, 0.0, std::f64::consts::PI)
                .ok();
            ctx.fill();
        } else if player.happy < 0.0 {
            ctx.begin_path();
            ctx.arc(
                0.0,
                mouth_y - 2.0,
                half / 2.5,
                std::f64::consts::PI,
                std::f64::consts::TAU,
            )
            .ok();
            ctx.fill();
        } else {
            match player.mouth_cycle {
                0 => ctx.fill_rect(-half / 4.0, mouth_y, half / 2.0, 2.0),
                1 => {
                    ctx.begin_path();
                    ctx.arc(0.0, mouth_y + 1.0, half / 4.0, 0.0, std::f64::consts::PI)
                        .ok();
                    ctx.fill();
                }
                2 => ctx.fill_rect(-half / 3.0, mouth_y, half / 1.5, 1.5),
                _ => {
                    ctx.begin_path();
                    ctx.arc(
                        0.0,
                        mouth_y,
                        half / 4.0,
                        std::f64::consts::PI,
                        std::f64::consts::TAU,
                    )
                    .ok();
                    ctx.fill();
                }
            }
        }

        ctx.restore();
    }
}
