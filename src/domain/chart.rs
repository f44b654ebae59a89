// Bounded telemetry history and its chart-surface projection
use super::telemetry::ChartPoint;
use std::collections::VecDeque;

/// Capacity of the history window, ~72 s at the 300 ms poll cadence.
pub const MAX_POINTS: usize = 240;

/// Logical drawing surface the projection targets. The terminal canvas
/// scales these units to whatever cell area it is given.
pub const CHART_WIDTH: f64 = 240.0;
pub const CHART_HEIGHT: f64 = 120.0;

pub const TEMP_DOMAIN: (f64, f64) = (0.0, 120.0);
pub const PRESSURE_DOMAIN: (f64, f64) = (7.0, 9.0);

/// Radius of the marker highlighting the newest temperature point.
pub const HIGHLIGHT_RADIUS: f64 = 4.0;

/// Ordered history of chart points with strict FIFO eviction at capacity.
#[derive(Debug, Clone)]
pub struct ChartBuffer {
    points: VecDeque<ChartPoint>,
}

impl ChartBuffer {
    pub fn new() -> Self {
        Self {
            points: VecDeque::with_capacity(MAX_POINTS + 1),
        }
    }

    /// Append a point; evict the oldest once the capacity is exceeded.
    pub fn push(&mut self, point: ChartPoint) {
        self.points.push_back(point);
        if self.points.len() > MAX_POINTS {
            self.points.pop_front();
        }
    }

    /// Read-only view in insertion order, oldest first.
    pub fn points(&self) -> impl Iterator<Item = &ChartPoint> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last(&self) -> Option<&ChartPoint> {
        self.points.back()
    }
}

/// Horizontal position of buffer slot `i`: the x-axis is indexed by slot,
/// not elapsed time, so a partial buffer draws compressed toward the left
/// and a full one spans the whole surface.
pub fn slot_x(i: usize) -> f64 {
    i as f64 * (CHART_WIDTH / (MAX_POINTS - 1) as f64)
}

fn project_y(value: f64, domain: (f64, f64)) -> f64 {
    let (min, max) = domain;
    let v = value.clamp(min, max);
    ((v - min) / (max - min)) * CHART_HEIGHT
}

/// Vertical position of a temperature over the fixed [0, 120] °C domain;
/// higher temperature sits higher on the surface.
pub fn temp_y(value: f64) -> f64 {
    project_y(value, TEMP_DOMAIN)
}

/// Vertical position of a pressure over the fixed [7.0, 9.0] bar domain.
pub fn pressure_y(value: f64) -> f64 {
    project_y(value, PRESSURE_DOMAIN)
}

/// Heights of the 5 horizontal background grid lines (6 equal bands,
/// edges excluded).
pub fn horizontal_gridlines() -> impl Iterator<Item = f64> {
    (1..6).map(|i| (CHART_HEIGHT / 6.0) * i as f64)
}

/// Positions of the 9 vertical background grid lines (10 equal columns).
pub fn vertical_gridlines() -> impl Iterator<Item = f64> {
    (1..10).map(|i| (CHART_WIDTH / 10.0) * i as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(n: f64) -> ChartPoint {
        ChartPoint::new(n, 50.0 + n, 8.0)
    }

    #[test]
    fn test_buffer_keeps_insertion_order() {
        let mut buffer = ChartBuffer::new();
        buffer.push(point(1.0));
        buffer.push(point(2.0));
        buffer.push(point(3.0));
        let ts: Vec<f64> = buffer.points().map(|p| p.t).collect();
        assert_eq!(ts, vec![1.0, 2.0, 3.0]);
        assert_eq!(buffer.last().map(|p| p.t), Some(3.0));
    }

    #[test]
    fn test_buffer_evicts_oldest_at_capacity() {
        let mut buffer = ChartBuffer::new();
        for n in 0..(MAX_POINTS + 1) {
            buffer.push(point(n as f64));
        }
        assert_eq!(buffer.len(), MAX_POINTS);
        // The first push was evicted; slot 0 now holds the second one.
        assert_eq!(buffer.points().next().map(|p| p.t), Some(1.0));
        assert_eq!(buffer.last().map(|p| p.t), Some(MAX_POINTS as f64));
    }

    #[test]
    fn test_slot_x_spans_surface() {
        assert_eq!(slot_x(0), 0.0);
        assert_eq!(slot_x(MAX_POINTS - 1), CHART_WIDTH);
        assert!(slot_x(120) < slot_x(121));
    }

    #[test]
    fn test_temp_projection() {
        assert_eq!(temp_y(0.0), 0.0);
        assert_eq!(temp_y(60.0), CHART_HEIGHT / 2.0);
        assert_eq!(temp_y(120.0), CHART_HEIGHT);
        // Out-of-domain values clamp onto the surface.
        assert_eq!(temp_y(500.0), CHART_HEIGHT);
        assert_eq!(temp_y(-20.0), 0.0);
    }

    #[test]
    fn test_pressure_projection() {
        assert_eq!(pressure_y(7.0), 0.0);
        assert_eq!(pressure_y(8.0), CHART_HEIGHT / 2.0);
        assert_eq!(pressure_y(9.0), CHART_HEIGHT);
    }

    #[test]
    fn test_gridline_layout() {
        let rows: Vec<f64> = horizontal_gridlines().collect();
        let cols: Vec<f64> = vertical_gridlines().collect();
        assert_eq!(rows.len(), 5);
        assert_eq!(cols.len(), 9);
        assert_eq!(rows[0], CHART_HEIGHT / 6.0);
        assert_eq!(cols[8], CHART_WIDTH * 0.9);
        // Edges are excluded.
        assert!(rows.iter().all(|y| *y > 0.0 && *y < CHART_HEIGHT));
        assert!(cols.iter().all(|x| *x > 0.0 && *x < CHART_WIDTH));
    }
}
