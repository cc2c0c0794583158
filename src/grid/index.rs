use geo::{BoundingRect, MultiPolygon};
use rstar::primitives::{GeomWithData, Rectangle};
use rstar::{RTree, AABB};

/// A cell envelope tagged with the cell's position in the dataset.
type CellEnvelope = GeomWithData<Rectangle<[f64; 2]>, usize>;

/// Broad-phase spatial index over cell envelopes.
///
/// Answers "which cells could touch this shape"; callers run the exact
/// geometric predicate on the candidates it returns.
#[derive(Debug, Clone)]
pub(super) struct EnvelopeIndex {
    rtree: RTree<CellEnvelope>,
}

impl EnvelopeIndex {
    /// Bulk-load the envelopes of `shapes`, tagging each with its position.
    /// Shapes without coordinates are left out.
    pub(super) fn build<'a>(shapes: impl IntoIterator<Item = &'a MultiPolygon<f64>>) -> Self {
        let envelopes = shapes.into_iter()
            .enumerate()
            .filter_map(|(i, shape)| envelope_of(shape).map(|aabb| GeomWithData::new(Rectangle::from_aabb(aabb), i)))
            .collect::<Vec<_>>();
        Self { rtree: RTree::bulk_load(envelopes) }
    }

    /// Positions whose envelope meets the envelope of `shape`, in no particular order.
    pub(super) fn candidates(&self, shape: &MultiPolygon<f64>) -> Vec<usize> {
        let Some(search) = envelope_of(shape) else { return Vec::new() };
        self.rtree.locate_in_envelope_intersecting(&search)
            .map(|envelope| envelope.data)
            .collect()
    }
}

fn envelope_of(shape: &MultiPolygon<f64>) -> Option<AABB<[f64; 2]>> {
    shape.bounding_rect().map(|rect| AABB::from_corners(rect.min().into(), rect.max().into()))
}

#[cfg(test)]
mod tests {
    use geo::polygon;

    use super::*;

    fn square(x: f64, y: f64, side: f64) -> MultiPolygon<f64> {
        polygon![(x: x, y: y), (x: x + side, y: y), (x: x + side, y: y + side), (x: x, y: y + side)].into()
    }

    #[test]
    fn candidates_come_from_overlapping_envelopes() {
        let shapes = [square(0.0, 0.0, 1.0), square(5.0, 5.0, 1.0), square(0.5, 0.5, 1.0)];
        let index = EnvelopeIndex::build(&shapes);

        let mut hits = index.candidates(&square(0.9, 0.9, 0.05));
        hits.sort_unstable();
        assert_eq!(hits, vec![0, 2]);
        assert!(index.candidates(&square(20.0, 20.0, 1.0)).is_empty());
    }

    #[test]
    fn empty_shapes_are_skipped() {
        let shapes = [MultiPolygon::<f64>::new(vec![]), square(0.0, 0.0, 1.0)];
        let index = EnvelopeIndex::build(&shapes);
        assert_eq!(index.candidates(&square(0.0, 0.0, 1.0)), vec![1]);
        assert!(index.candidates(&MultiPolygon::new(vec![])).is_empty());
    }
}
