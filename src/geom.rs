use core::f64;

const WEDGE_EPSILON: f64 = 1e-9;

/// Point relative to the snowflake center, y pointing up.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub(crate) struct Point {
    pub x: f64,
    pub y: f64,
}
impl Point {
    pub const ORIGIN: Self = Self { x: 0., y: 0. };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn from_polar(radius: f64, theta: f64) -> Self {
        Self {
            x: radius * theta.cos(),
            y: radius * theta.sin(),
        }
    }

    pub fn radius(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Angle in `[0, 2pi)`.
    pub fn theta(self) -> f64 {
        self.y.atan2(self.x).rem_euclid(f64::consts::TAU)
    }

    /// Rotates counterclockwise around the origin.
    pub fn rotate(self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
        }
    }

    /// Reflects across the x axis.
    pub fn mirror(self) -> Self {
        Self {
            x: self.x,
            y: -self.y,
        }
    }

    /// Whether the angle lies in `[0, arc]`, with a little slack for
    /// points that were clipped onto a boundary ray.
    pub fn in_wedge(self, arc: f64) -> bool {
        if arc >= f64::consts::TAU || self.radius() == 0. {
            return true;
        }
        let theta = self.theta();
        theta <= arc + WEDGE_EPSILON || theta >= f64::consts::TAU - WEDGE_EPSILON
    }
}
#[cfg(test)]
impl Point {
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn approx_eq(self, other: Self, epsilon: f64) -> bool {
        self.distance(other) <= epsilon
    }
}

/// One straight stroke unit.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub(crate) struct Segment {
    pub start: Point,
    pub end: Point,
}
impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn rotate(self, angle: f64) -> Self {
        Self {
            start: self.start.rotate(angle),
            end: self.end.rotate(angle),
        }
    }

    pub fn mirror(self) -> Self {
        Self {
            start: self.start.mirror(),
            end: self.end.mirror(),
        }
    }

    pub fn in_wedge(self, arc: f64) -> bool {
        self.start.in_wedge(arc) && self.end.in_wedge(arc)
    }
}
#[cfg(test)]
impl Segment {
    pub fn approx_eq(self, other: Self, epsilon: f64) -> bool {
        self.start.approx_eq(other.start, epsilon) && self.end.approx_eq(other.end, epsilon)
    }
}

/// Angle of one slice for an N-fold snowflake.
pub(crate) fn slice_angle(count: u32) -> f64 {
    f64::consts::TAU / count.max(1) as f64
}

/// Moves a point into the wedge `[0, arc]` of the unit disc.
///
/// Angles outside the wedge are clipped to the nearest boundary ray and the
/// radius is clipped to 1.
pub(crate) fn clip_to_wedge(point: Point, arc: f64) -> Point {
    let radius = point.radius().min(1.);
    if radius == 0. {
        return Point::ORIGIN;
    }
    if arc >= f64::consts::TAU {
        return Point::from_polar(radius, point.theta());
    }
    let theta = point.theta();
    let theta = if theta <= arc {
        theta
    } else if theta - arc < f64::consts::TAU - theta {
        arc
    } else {
        0.
    };
    Point::from_polar(radius, theta)
}
