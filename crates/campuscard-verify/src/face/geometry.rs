//! Bounding-box arithmetic for grouping raw scan hits into detections.

use campuscard_core::FaceBox;

/// Intersection-over-union of two boxes. 0.0 when disjoint.
pub(crate) fn overlap_ratio(a: &FaceBox, b: &FaceBox) -> f64 {
    let x1 = a.x.max(b.x);
    let y1 = a.y.max(b.y);
    let x2 = (a.x + a.w).min(b.x + b.w);
    let y2 = (a.y + a.h).min(b.y + b.h);

    if x2 <= x1 || y2 <= y1 {
        return 0.0;
    }

    let inter = (x2 - x1) as f64 * (y2 - y1) as f64;
    let union = a.area() as f64 + b.area() as f64 - inter;
    inter / union
}

/// Minimum overlap for two raw hits to vote for the same face.
const GROUP_OVERLAP: f64 = 0.3;

/// Fraction of a box's area inside a larger box before it counts as nested.
const NESTED_CONTAINMENT: f64 = 0.6;

fn intersection_area(a: &FaceBox, b: &FaceBox) -> u64 {
    let x1 = a.x.max(b.x);
    let y1 = a.y.max(b.y);
    let x2 = (a.x + a.w).min(b.x + b.w);
    let y2 = (a.y + a.h).min(b.y + b.h);

    if x2 <= x1 || y2 <= y1 {
        return 0;
    }
    (x2 - x1) as u64 * (y2 - y1) as u64
}

/// Drop detections that sit mostly inside a larger detection. A dark band
/// inside a face also scores at smaller window sizes, and those nested
/// clusters are echoes of the same face, not a second one.
pub(crate) fn suppress_nested(mut detections: Vec<FaceBox>) -> Vec<FaceBox> {
    detections.sort_by(|a, b| b.area().cmp(&a.area()));

    let mut kept: Vec<FaceBox> = Vec::new();
    for candidate in detections {
        let nested = kept.iter().any(|k| {
            intersection_area(k, &candidate) as f64 / candidate.area() as f64
                > NESTED_CONTAINMENT
        });
        if !nested {
            kept.push(candidate);
        }
    }
    kept
}

struct Cluster {
    sx: u64,
    sy: u64,
    sw: u64,
    sh: u64,
    count: u64,
    repr: FaceBox,
}

impl Cluster {
    fn new(hit: FaceBox) -> Self {
        Cluster {
            sx: hit.x as u64,
            sy: hit.y as u64,
            sw: hit.w as u64,
            sh: hit.h as u64,
            count: 1,
            repr: hit,
        }
    }

    fn add(&mut self, hit: FaceBox) {
        self.sx += hit.x as u64;
        self.sy += hit.y as u64;
        self.sw += hit.w as u64;
        self.sh += hit.h as u64;
        self.count += 1;
        self.repr = self.average();
    }

    fn average(&self) -> FaceBox {
        FaceBox {
            x: (self.sx / self.count) as u32,
            y: (self.sy / self.count) as u32,
            w: (self.sw / self.count) as u32,
            h: (self.sh / self.count) as u32,
        }
    }
}

/// Group raw window hits into detections, cascade-style: hits overlapping a
/// cluster's running average join it, and only clusters with at least
/// `min_neighbors` votes survive. Each surviving cluster is reported as its
/// averaged box.
pub(crate) fn group_hits(hits: &[FaceBox], min_neighbors: usize) -> Vec<FaceBox> {
    let mut clusters: Vec<Cluster> = Vec::new();

    for &hit in hits {
        match clusters
            .iter_mut()
            .find(|c| overlap_ratio(&c.repr, &hit) >= GROUP_OVERLAP)
        {
            Some(cluster) => cluster.add(hit),
            None => clusters.push(Cluster::new(hit)),
        }
    }

    clusters
        .into_iter()
        .filter(|c| c.count >= min_neighbors as u64)
        .map(|c| c.average())
        .collect()
}
