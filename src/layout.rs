use kurbo::Point;

use crate::error::{StackVizError, StackVizResult};

/// Fixed container geometry for one scene.
///
/// `origin` is the bottom-center of the frame in scene units (y grows
/// upward); elements stack upward from it.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StackFrame {
    pub origin: Point,
    pub width: f64,
    pub height: f64,
}

impl StackFrame {
    pub fn new(origin: Point, width: f64, height: f64) -> StackVizResult<Self> {
        let frame = Self {
            origin,
            width,
            height,
        };
        frame.validate()?;
        Ok(frame)
    }

    pub fn validate(&self) -> StackVizResult<()> {
        if !(self.width > 0.0) || !(self.height > 0.0) {
            return Err(StackVizError::validation("frame width/height must be > 0"));
        }
        Ok(())
    }

    /// Bottom-center of the frame, the empty-stack baseline.
    pub fn base(&self) -> Point {
        self.origin
    }

    pub fn right_edge_x(&self) -> f64 {
        self.origin.x + self.width / 2.0
    }

    pub fn top_y(&self) -> f64 {
        self.origin.y + self.height
    }
}

/// Element cell geometry and the horizontal offsets of the choreography.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ElementMetrics {
    pub element_width: f64,
    pub element_height: f64,
    /// Vertical pitch between slot centers.
    pub spacing: f64,
    /// Pointer group offset from the frame's center line.
    pub pointer_dx: f64,
    /// How far past the right edge a popped element is carried.
    pub exit_dx: f64,
}

impl Default for ElementMetrics {
    fn default() -> Self {
        Self {
            element_width: 2.3,
            element_height: 0.8,
            spacing: 0.8,
            pointer_dx: 1.5,
            exit_dx: 3.0,
        }
    }
}

impl ElementMetrics {
    pub fn validate(&self) -> StackVizResult<()> {
        if !(self.element_width > 0.0) || !(self.element_height > 0.0) {
            return Err(StackVizError::validation(
                "element width/height must be > 0",
            ));
        }
        if !(self.spacing > 0.0) {
            return Err(StackVizError::validation("element spacing must be > 0"));
        }
        Ok(())
    }
}

/// Pure placement arithmetic for a stack of uniformly sized elements and
/// its pointer indicator. No side effects, no I/O.
#[derive(Clone, Copy, Debug)]
pub struct StackLayout {
    pub frame: StackFrame,
    pub metrics: ElementMetrics,
}

impl StackLayout {
    pub fn new(frame: StackFrame, metrics: ElementMetrics) -> StackVizResult<Self> {
        metrics.validate()?;
        Ok(Self { frame, metrics })
    }

    /// Center of the slot holding the element at `index` (0 = bottom).
    ///
    /// Strictly monotonic in `index`; slot 0 sits flush with the frame base
    /// plus half an element height.
    pub fn slot_position(&self, index: usize) -> Point {
        let y = self.frame.origin.y
            + (index as f64) * self.metrics.spacing
            + self.metrics.element_height / 2.0;
        Point::new(self.frame.origin.x, y)
    }

    /// Pointer position for a stack of `count` elements: the slot just above
    /// the top, offset sideways out of the frame. An empty stack parks the
    /// pointer at the frame base.
    pub fn pointer_position(&self, count: usize) -> Point {
        let x = self.frame.origin.x + self.metrics.pointer_dx;
        if count == 0 {
            return Point::new(x, self.frame.origin.y);
        }
        Point::new(x, self.slot_position(count).y)
    }

    /// Target slot for a push onto a stack currently holding `count` elements.
    pub fn push_target(&self, count: usize) -> Point {
        self.slot_position(count)
    }

    /// Slot of the element a pop removes from a stack of `count` elements.
    pub fn pop_source(&self, count: usize) -> StackVizResult<Point> {
        if count == 0 {
            return Err(StackVizError::empty_stack(
                "pop position requested for an empty stack",
            ));
        }
        Ok(self.slot_position(count - 1))
    }

    /// Where a freshly pushed element first appears, one slot below the base.
    pub fn entry_position(&self) -> Point {
        Point::new(
            self.frame.origin.x,
            self.frame.origin.y - self.metrics.spacing,
        )
    }

    /// Where a popped element from `index` is carried before fading out.
    pub fn exit_position(&self, index: usize) -> Point {
        Point::new(
            self.frame.right_edge_x() + self.metrics.exit_dx,
            self.slot_position(index).y,
        )
    }
}
