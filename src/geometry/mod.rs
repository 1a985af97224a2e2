//! Geometric primitives for layout analysis.
//!
//! This module provides the basic geometric types used throughout layout
//! classification and structure building.

/// A 2D point in document space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// Create a new point.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A rectangle in document space.
///
/// Stored as position plus dimensions. Page-space rectangles in this crate
/// use a top-left origin with y increasing downward, matching the layout
/// reader's output; see [`crate::layout`] for the flip into display space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// X coordinate of top-left corner
    pub x: f32,
    /// Y coordinate of top-left corner
    pub y: f32,
    /// Width of rectangle
    pub width: f32,
    /// Height of rectangle
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle from position and dimensions.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from two corner points.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_autotag::geometry::Rect;
    ///
    /// let rect = Rect::from_points(10.0, 20.0, 110.0, 70.0);
    /// assert_eq!(rect.x, 10.0);
    /// assert_eq!(rect.width, 100.0);
    /// assert_eq!(rect.height, 50.0);
    /// ```
    pub fn from_points(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            x: x0,
            y: y0,
            width: x1 - x0,
            height: y1 - y0,
        }
    }

    /// Get the left edge x-coordinate.
    pub fn left(&self) -> f32 {
        self.x
    }

    /// Get the right edge x-coordinate.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Get the top edge y-coordinate.
    pub fn top(&self) -> f32 {
        self.y
    }

    /// Get the bottom edge y-coordinate.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Compute the union of this rectangle with another.
    pub fn union(&self, other: &Rect) -> Rect {
        let x0 = self.left().min(other.left());
        let y0 = self.top().min(other.top());
        let x1 = self.right().max(other.right());
        let y1 = self.bottom().max(other.bottom());
        Rect::from_points(x0, y0, x1, y1)
    }

    /// Check whether this rectangle lies entirely inside `other`, allowing
    /// each edge of `other` to be expanded by `margin`.
    ///
    /// Used to drop text blocks that sit inside a detected table region.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_autotag::geometry::Rect;
    ///
    /// let table = Rect::from_points(100.0, 100.0, 300.0, 200.0);
    /// let cell_text = Rect::from_points(103.0, 98.0, 150.0, 110.0);
    /// let outside = Rect::from_points(50.0, 100.0, 150.0, 110.0);
    ///
    /// assert!(cell_text.inside_with_margin(&table, 5.0));
    /// assert!(!outside.inside_with_margin(&table, 5.0));
    /// ```
    pub fn inside_with_margin(&self, other: &Rect, margin: f32) -> bool {
        self.left() >= other.left() - margin
            && self.top() >= other.top() - margin
            && self.right() <= other.right() + margin
            && self.bottom() <= other.bottom() + margin
    }

    /// Corner representation `[x0, y0, x1, y1]`.
    pub fn corners(&self) -> [f32; 4] {
        [self.left(), self.top(), self.right(), self.bottom()]
    }
}
