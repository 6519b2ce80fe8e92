//! Map canvas widget.
//!
//! A Web Mercator view without tiles: a grid, the workout pins with their
//! popups, click-to-pick and drag-to-pan.

use std::collections::BTreeMap;
use std::f64::consts::PI;
use std::time::{Duration, Instant};

use egui::{Align2, FontId, Pos2, Rect, Sense, Stroke, Ui, Vec2};

use crate::ui::map::{MapView, MarkerPopup, PanOptions};
use crate::ui::theme::{kind_color, Palette};
use crate::workouts::Coords;

/// Side of a map tile in points.
const TILE_SIZE: f64 = 256.0;
/// Latitude limit of the Mercator projection.
const MAX_LATITUDE: f64 = 85.051_128_78;

/// Project coordinates to world pixels at a zoom level.
pub fn project(coords: Coords, zoom: u8) -> (f64, f64) {
    let scale = TILE_SIZE * 2f64.powi(zoom as i32);
    let lat = coords.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();

    let x = (coords.lng + 180.0) / 360.0 * scale;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * scale;
    (x, y)
}

/// Convert world pixels back to coordinates.
pub fn unproject(x: f64, y: f64, zoom: u8) -> Coords {
    let scale = TILE_SIZE * 2f64.powi(zoom as i32);

    let lng = x / scale * 360.0 - 180.0;
    let n = PI - 2.0 * PI * y / scale;
    let lat = n.sinh().atan().to_degrees();
    Coords::new(lat, lng)
}

/// Handle of a marker on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(u64);

#[derive(Debug, Clone)]
struct PlacedMarker {
    coords: Coords,
    popup: MarkerPopup,
}

#[derive(Debug, Clone, Copy)]
struct PanAnimation {
    from: Coords,
    to: Coords,
    started: Instant,
    duration: Duration,
}

impl PanAnimation {
    fn position(&self, now: Instant) -> Option<Coords> {
        let t = now.duration_since(self.started).as_secs_f64() / self.duration.as_secs_f64();
        if t >= 1.0 {
            return None;
        }
        // Ease out
        let t = 1.0 - (1.0 - t).powi(3);
        Some(Coords::new(
            self.from.lat + (self.to.lat - self.from.lat) * t,
            self.from.lng + (self.to.lng - self.from.lng) * t,
        ))
    }
}

/// Map canvas state.
#[derive(Debug, Clone, Default)]
pub struct MapCanvas {
    center: Option<Coords>,
    zoom: u8,
    markers: BTreeMap<MarkerId, PlacedMarker>,
    next_id: u64,
    pan: Option<PanAnimation>,
}

impl MapCanvas {
    /// Create a canvas with no view yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Target center of the view, if one has been set.
    pub fn center(&self) -> Option<Coords> {
        self.center
    }

    /// Current zoom level.
    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    /// Number of placed markers.
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Whether a pan animation is running.
    pub fn is_panning(&self) -> bool {
        self.pan.is_some()
    }

    fn displayed_center(&mut self, now: Instant) -> Option<Coords> {
        if let Some(pan) = self.pan {
            match pan.position(now) {
                Some(position) => return Some(position),
                None => self.pan = None,
            }
        }
        self.center
    }

    /// Draw the map. Returns the coordinates of a click, if any.
    pub fn show(&mut self, ui: &mut Ui) -> Option<Coords> {
        let now = Instant::now();
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
        let rect = response.rect;

        painter.rect_filled(rect, 0.0, Palette::MAP_BG);

        let Some(center) = self.displayed_center(now) else {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "Waiting for your location…",
                FontId::proportional(18.0),
                Palette::TEXT_SECONDARY,
            );
            return None;
        };

        if self.pan.is_some() {
            ui.ctx().request_repaint();
        }

        let zoom = self.zoom;
        let (cx, cy) = project(center, zoom);
        let origin = rect.center();
        let to_screen = |coords: Coords| {
            let (x, y) = project(coords, zoom);
            Pos2::new(origin.x + (x - cx) as f32, origin.y + (y - cy) as f32)
        };

        draw_grid(&painter, rect, cx, cy);

        for marker in self.markers.values() {
            let pos = to_screen(marker.coords);
            if rect.expand(marker.popup.max_width).contains(pos) {
                draw_marker(&painter, pos, &marker.popup);
            }
        }

        if response.dragged() {
            let delta = response.drag_delta();
            self.center = Some(unproject(cx - delta.x as f64, cy - delta.y as f64, zoom));
            self.pan = None;
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let x = cx + (pos.x - origin.x) as f64;
                let y = cy + (pos.y - origin.y) as f64;
                return Some(unproject(x, y, zoom));
            }
        }

        None
    }
}

fn draw_grid(painter: &egui::Painter, rect: Rect, cx: f64, cy: f64) {
    let stroke = Stroke::new(1.0, Palette::MAP_GRID);
    let left = cx - rect.width() as f64 / 2.0;
    let top = cy - rect.height() as f64 / 2.0;

    let mut x = (left / TILE_SIZE).floor() * TILE_SIZE;
    while x < left + rect.width() as f64 {
        let sx = rect.min.x + (x - left) as f32;
        painter.line_segment([Pos2::new(sx, rect.min.y), Pos2::new(sx, rect.max.y)], stroke);
        x += TILE_SIZE;
    }

    let mut y = (top / TILE_SIZE).floor() * TILE_SIZE;
    while y < top + rect.height() as f64 {
        let sy = rect.min.y + (y - top) as f32;
        painter.line_segment([Pos2::new(rect.min.x, sy), Pos2::new(rect.max.x, sy)], stroke);
        y += TILE_SIZE;
    }
}

fn draw_marker(painter: &egui::Painter, pos: Pos2, popup: &MarkerPopup) {
    let color = kind_color(popup.kind);
    let padding = 8.0;

    painter.circle_filled(pos, 7.0, color);
    painter.circle_stroke(pos, 7.0, Stroke::new(2.0, Palette::TEXT_PRIMARY));

    let galley = painter.layout(
        popup.content.clone(),
        FontId::proportional(14.0),
        Palette::TEXT_PRIMARY,
        popup.max_width - 2.0 * padding,
    );
    let width = (galley.size().x + 2.0 * padding).clamp(popup.min_width, popup.max_width);
    let height = galley.size().y + 2.0 * padding;

    let bubble = Rect::from_min_size(
        Pos2::new(pos.x - width / 2.0, pos.y - 14.0 - height),
        Vec2::new(width, height),
    );
    painter.rect_filled(bubble, 5.0, Palette::CARD_BG);
    painter.rect_filled(
        Rect::from_min_size(bubble.min, Vec2::new(5.0, height)),
        0.0,
        color,
    );
    painter.galley(
        bubble.min + Vec2::new(padding + 3.0, padding),
        galley,
        Palette::TEXT_PRIMARY,
    );
}

impl MapView for MapCanvas {
    type Marker = MarkerId;

    fn place_marker(&mut self, coords: Coords, popup: &MarkerPopup) -> MarkerId {
        let id = MarkerId(self.next_id);
        self.next_id += 1;
        self.markers.insert(
            id,
            PlacedMarker {
                coords,
                popup: popup.clone(),
            },
        );
        id
    }

    fn remove_marker(&mut self, marker: MarkerId) {
        self.markers.remove(&marker);
    }

    fn set_view(&mut self, center: Coords, zoom: u8, pan: PanOptions) {
        let now = Instant::now();
        let from = self.displayed_center(now);

        // Negative, NaN and infinite durations jump instead of panning
        let duration = Duration::try_from_secs_f32(pan.duration_secs)
            .ok()
            .filter(|d| !d.is_zero());

        self.pan = match (from, duration) {
            (Some(from), Some(duration)) if pan.animate && zoom == self.zoom => Some(PanAnimation {
                from,
                to: center,
                started: now,
                duration,
            }),
            _ => None,
        };
        self.center = Some(center);
        self.zoom = zoom;
    }
}
