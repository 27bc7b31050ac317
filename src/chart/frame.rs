/// Empty space kept around the plot area, in output units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Output surface with a top-left origin: y grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
    pub padding: Padding,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Frame {
    /// Scaling-series chart. The wide bottom margin holds the rotated
    /// x-axis labels.
    pub const BAND: Frame = Frame {
        width: 1000.0,
        height: 400.0,
        padding: Padding {
            top: 20.0,
            right: 20.0,
            bottom: 90.0,
            left: 100.0,
        },
    };

    /// Expected-outcome overlay drawn above a distribution.
    pub const OVERLAY: Frame = Frame {
        width: 1000.0,
        height: 200.0,
        padding: Padding {
            top: 10.0,
            right: 0.0,
            bottom: 0.0,
            left: 0.0,
        },
    };

    pub fn usable_width(&self) -> f64 {
        (self.width - self.padding.left - self.padding.right).max(0.0)
    }

    pub fn usable_height(&self) -> f64 {
        (self.height - self.padding.top - self.padding.bottom).max(0.0)
    }

    /// y of the value 0.
    pub fn baseline(&self) -> f64 {
        self.height - self.padding.bottom
    }

    /// Uniform spacing by index. A lone point sits in the middle.
    pub fn x_at_index(&self, index: usize, count: usize) -> f64 {
        if count <= 1 {
            return self.padding.left + self.usable_width() / 2.0;
        }
        self.x_at_fraction(index as f64 / (count - 1) as f64)
    }

    pub fn x_at_fraction(&self, fraction: f64) -> f64 {
        self.padding.left + fraction * self.usable_width()
    }

    /// Linear map of `value` in [0, ceiling] onto the plot height.
    pub fn y_for(&self, value: f64, ceiling: f64) -> f64 {
        if ceiling <= 0.0 || !ceiling.is_finite() || !value.is_finite() {
            return self.baseline();
        }
        self.baseline() - (value / ceiling) * self.usable_height()
    }

    pub fn point(&self, index: usize, count: usize, value: f64, ceiling: f64) -> Point {
        Point {
            x: self.x_at_index(index, count),
            y: self.y_for(value, ceiling),
        }
    }
}
