/// Axis aligned pixel rectangle. `x2`/`y2` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Area {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
}

impl Area {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        let clamp = |len: u32| len.min(i32::MAX as u32) as i32;
        Self {
            x1: x,
            y1: y,
            x2: x.saturating_add(clamp(width)),
            y2: y.saturating_add(clamp(height)),
        }
    }

    pub fn width(&self) -> u32 {
        (self.x2 - self.x1).max(0) as u32
    }

    pub fn height(&self) -> u32 {
        (self.y2 - self.y1).max(0) as u32
    }

    pub fn size(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.x2 <= self.x1 || self.y2 <= self.y1
    }

    pub fn intersect(&self, other: &Area) -> Option<Area> {
        let area = Area {
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
            x2: self.x2.min(other.x2),
            y2: self.y2.min(other.y2),
        };
        (!area.is_empty()).then_some(area)
    }

    /// Smallest area covering both.
    pub fn union(&self, other: &Area) -> Area {
        Area {
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
            x2: self.x2.max(other.x2),
            y2: self.y2.max(other.y2),
        }
    }

    pub fn grow(&self, by: i32) -> Area {
        Area {
            x1: self.x1 - by,
            y1: self.y1 - by,
            x2: self.x2 + by,
            y2: self.y2 + by,
        }
    }

    pub fn translate(&self, dx: i32, dy: i32) -> Area {
        Area {
            x1: self.x1 + dx,
            y1: self.y1 + dy,
            x2: self.x2 + dx,
            y2: self.y2 + dy,
        }
    }
}

/// Merge invalidated areas wherever the merged area is smaller than the two
/// parts added together.
pub fn join_areas(mut areas: Vec<Area>) -> Vec<Area> {
    areas.retain(|a| !a.is_empty());

    let mut merged = true;
    while merged {
        merged = false;
        'outer: for i in 0..areas.len() {
            for j in (i + 1)..areas.len() {
                let joined = areas[i].union(&areas[j]);
                if joined.size() < areas[i].size() + areas[j].size() {
                    areas[i] = joined;
                    areas.swap_remove(j);
                    merged = true;
                    break 'outer;
                }
            }
        }
    }

    areas
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersect_and_union() {
        let a = Area::new(0, 0, 10, 10);
        let b = Area::new(5, 5, 10, 10);
        assert_eq!(a.intersect(&b), Some(Area::new(5, 5, 5, 5)));
        assert_eq!(a.union(&b), Area::new(0, 0, 15, 15));
        assert_eq!(a.intersect(&Area::new(20, 20, 1, 1)), None);
    }

    #[test]
    fn test_size_of_inverted_area_is_zero() {
        let area = Area {
            x1: 5,
            y1: 0,
            x2: 2,
            y2: 10,
        };
        assert!(area.is_empty());
        assert_eq!(area.size(), 0);
    }

    #[test]
    fn test_new_saturates_huge_sizes() {
        let area = Area::new(10, 0, u32::MAX, 5);
        assert_eq!(area.x2, i32::MAX);
        assert!(!area.is_empty());
    }

    #[test]
    fn test_join_overlapping_areas() {
        let joined = join_areas(vec![
            Area::new(0, 0, 10, 10),
            Area::new(0, 5, 10, 10),
            Area::new(100, 100, 5, 5),
        ]);
        assert_eq!(joined.len(), 2);
        assert!(joined.contains(&Area::new(0, 0, 10, 15)));
        assert!(joined.contains(&Area::new(100, 100, 5, 5)));
    }

    #[test]
    fn test_join_keeps_distant_areas_apart() {
        let joined = join_areas(vec![Area::new(0, 0, 2, 2), Area::new(50, 50, 2, 2)]);
        assert_eq!(joined.len(), 2);
    }

    #[test]
    fn test_join_drops_empty_areas() {
        let joined = join_areas(vec![Area::new(0, 0, 0, 5), Area::new(1, 1, 1, 1)]);
        assert_eq!(joined, vec![Area::new(1, 1, 1, 1)]);
    }
}
