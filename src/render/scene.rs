// SPDX-FileCopyrightText: 2026 GSI Helmholtzzentrum f. Schwerionenforschung GmbH, Darmstadt, Germany
// SPDX-License-Identifier: LGPL-3.0-or-later

//! Backend-independent drawing surface.
//!
//! Coordinates are canvas units with the origin at the top left and y
//! growing downwards. Shapes are kept in draw order; later shapes cover
//! earlier ones.

use super::color::{Rgb, BLACK};

/// Filled, outlined rectangle
#[derive(Debug, Clone, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: Rgb,
    pub edge: Rgb,
}

impl Rect {
    /// Node rectangle: solid fill with a black outline
    pub fn node(x: f64, y: f64, width: f64, height: f64, fill: Rgb) -> Self {
        Self { x, y, width, height, fill, edge: BLACK }
    }
}

/// Text anchored at its bottom-left corner; it extends up and to the right
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

/// Axis-aligned extent of a scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    fn include(&mut self, x: f64, y: f64) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    /// Grow by `margin` units on every side
    pub fn padded(mut self, margin: f64) -> Self {
        self.min_x -= margin;
        self.min_y -= margin;
        self.max_x += margin;
        self.max_y += margin;
        self
    }
}

/// The canvas all racks are drawn onto
#[derive(Debug, Default)]
pub struct Scene {
    pub rects: Vec<Rect>,
    pub labels: Vec<Label>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_rect(&mut self, rect: Rect) {
        self.rects.push(rect);
    }

    pub fn add_label(&mut self, x: f64, y: f64, text: impl Into<String>) {
        self.labels.push(Label { x, y, text: text.into() });
    }

    /// Extent of all rectangles and labels, `None` for an empty scene.
    ///
    /// Labels rise `label_height` canvas units above their anchor.
    pub fn bounds(&self, label_height: f64) -> Option<Bounds> {
        let mut points = self
            .rects
            .iter()
            .flat_map(|r| [(r.x, r.y), (r.x + r.width, r.y + r.height)])
            .chain(self.labels.iter().flat_map(|l| [(l.x, l.y), (l.x, l.y - label_height)]));

        let (x, y) = points.next()?;
        let mut bounds = Bounds { min_x: x, min_y: y, max_x: x, max_y: y };
        for (x, y) in points {
            bounds.include(x, y);
        }
        Some(bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::color::WHITE;

    #[test]
    fn test_empty_scene_has_no_bounds() {
        let scene = Scene::new();
        assert!(scene.rects.is_empty());
        assert!(scene.bounds(0.5).is_none());
    }

    #[test]
    fn test_bounds_cover_rects_and_labels() {
        let mut scene = Scene::new();
        scene.add_rect(Rect::node(1.0, 2.0, 0.5, 1.0, WHITE));
        scene.add_rect(Rect::node(4.0, 0.0, 0.5, 1.0, WHITE));
        scene.add_label(1.0, -0.1, "rack 0");

        let b = scene.bounds(0.0).unwrap();
        assert_eq!(b.min_x, 1.0);
        assert_eq!(b.min_y, -0.1);
        assert_eq!(b.max_x, 4.5);
        assert_eq!(b.max_y, 3.0);
        assert_eq!(b.width(), 3.5);

        let p = b.padded(1.0);
        assert_eq!(p.min_x, 0.0);
        assert_eq!(p.max_y, 4.0);
    }

    #[test]
    fn test_bounds_make_room_above_labels() {
        let mut scene = Scene::new();
        scene.add_rect(Rect::node(0.0, 0.0, 4.0, 8.0, WHITE));
        scene.add_label(0.0, -0.1, "rack 0");

        let b = scene.bounds(0.5).unwrap();
        assert_eq!(b.min_y, -0.6);
        assert_eq!(b.max_y, 8.0);
    }

    #[test]
    fn test_node_rect_is_outlined_black() {
        let rect = Rect::node(0.0, 0.0, 1.0, 1.0, WHITE);
        assert_eq!(rect.edge, BLACK);
        assert_eq!(rect.fill, WHITE);
    }
}
