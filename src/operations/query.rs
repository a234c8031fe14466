//! Recursive queries over the document tree
//!
//! Every query visits the top-level lists first and then each group in
//! pre-order document order. Group traversal uses `GroupWalk`, which keeps
//! its own stack, so arbitrarily deep documents are safe to query.

use crate::models::{Document, ElementKind, ElementRef};

impl Document {
    /// Every entity of `kind` at any depth, in pre-order document order.
    ///
    /// `ElementKind::Svg` yields nothing.
    pub fn iter_kind(&self, kind: ElementKind) -> Box<dyn Iterator<Item = ElementRef<'_>> + '_> {
        match kind {
            ElementKind::Svg => Box::new(std::iter::empty()),
            ElementKind::Rectangle => Box::new(
                self.rectangles
                    .iter()
                    .chain(self.all_groups().flat_map(|g| g.rectangles.iter()))
                    .map(ElementRef::Rectangle),
            ),
            ElementKind::Circle => Box::new(
                self.circles
                    .iter()
                    .chain(self.all_groups().flat_map(|g| g.circles.iter()))
                    .map(ElementRef::Circle),
            ),
            ElementKind::Path => Box::new(
                self.paths
                    .iter()
                    .chain(self.all_groups().flat_map(|g| g.paths.iter()))
                    .map(ElementRef::Path),
            ),
            ElementKind::Group => Box::new(self.all_groups().map(ElementRef::Group)),
        }
    }

    /// Collect every entity of `kind` at any depth
    pub fn collect_all(&self, kind: ElementKind) -> Vec<ElementRef<'_>> {
        self.iter_kind(kind).collect()
    }

    /// Count entities of `kind` for which `predicate` holds.
    ///
    /// The whole tree is always visited; empty subtrees contribute zero.
    pub fn count_matching<F>(&self, kind: ElementKind, mut predicate: F) -> usize
    where
        F: FnMut(ElementRef<'_>) -> bool,
    {
        self.iter_kind(kind).filter(|element| predicate(*element)).count()
    }

    /// Rectangles whose area rounds up to the same integer as `area`
    pub fn rects_with_area(&self, area: f64) -> usize {
        if area < 0.0 {
            return 0;
        }
        self.count_matching(ElementKind::Rectangle, matches_rect_area(area))
    }

    /// Circles whose area rounds up to the same integer as `area`
    pub fn circles_with_area(&self, area: f64) -> usize {
        if area < 0.0 {
            return 0;
        }
        self.count_matching(ElementKind::Circle, matches_circle_area(area))
    }

    /// Paths whose data equals `data` exactly
    pub fn paths_with_data(&self, data: &str) -> usize {
        self.count_matching(ElementKind::Path, matches_path_data(data))
    }

    /// Groups with exactly `len` direct children
    pub fn groups_with_len(&self, len: usize) -> usize {
        self.count_matching(ElementKind::Group, matches_group_len(len))
    }

    /// Total number of attributes held anywhere in the tree,
    /// including the document's own.
    pub fn count_attributes(&self) -> usize {
        let nested: usize = [
            ElementKind::Rectangle,
            ElementKind::Circle,
            ElementKind::Path,
            ElementKind::Group,
        ]
        .into_iter()
        .flat_map(|kind| self.iter_kind(kind))
        .map(|element| element.attributes().len())
        .sum();

        self.attributes.len() + nested
    }
}

/// Area comparison uses `ceil` on both sides as a float tolerance
pub fn matches_rect_area(area: f64) -> impl Fn(ElementRef<'_>) -> bool {
    let target = area.ceil();
    move |element| {
        element
            .as_rectangle()
            .map_or(false, |rect| rect.area().ceil() == target)
    }
}

pub fn matches_circle_area(area: f64) -> impl Fn(ElementRef<'_>) -> bool {
    let target = area.ceil();
    move |element| {
        element
            .as_circle()
            .map_or(false, |circle| circle.area().ceil() == target)
    }
}

pub fn matches_path_data(data: &str) -> impl Fn(ElementRef<'_>) -> bool + '_ {
    move |element| element.as_path().map_or(false, |path| path.data == data)
}

pub fn matches_group_len(len: usize) -> impl Fn(ElementRef<'_>) -> bool {
    move |element| element.as_group().map_or(false, |group| group.len() == len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Attribute, Circle, Group, Path, Rectangle, Unit, SVG_NAMESPACE};

    /// rect(2x3), circle(r=5), path "M0"
    /// g1 { rect(1x1), rect(2x2), circle(r=5), g2 {} }
    /// g3 { path "M0", g4 { circle(r=1) } }
    fn sample() -> Document {
        let mut doc = Document::new(SVG_NAMESPACE);
        doc.attributes.push(Attribute::new("width", "100"));
        doc.rectangles.push(Rectangle::new(0.0, 0.0, 2.0, 3.0, Unit::None));
        doc.circles.push(Circle::new(0.0, 0.0, 5.0, Unit::None));
        doc.paths.push(Path::new("M0"));

        let mut g1 = Group::new();
        g1.attributes.push(Attribute::new("id", "g1"));
        let mut small = Rectangle::new(0.0, 0.0, 1.0, 1.0, Unit::None);
        small.attributes.push(Attribute::new("fill", "red"));
        g1.rectangles.push(small);
        g1.rectangles.push(Rectangle::new(0.0, 0.0, 2.0, 2.0, Unit::None));
        g1.circles.push(Circle::new(0.0, 0.0, 5.0, Unit::None));
        g1.groups.push(Group::new());

        let mut g4 = Group::new();
        g4.circles.push(Circle::new(1.0, 1.0, 1.0, Unit::None));
        let mut g3 = Group::new();
        g3.paths.push(Path::new("M0"));
        g3.groups.push(g4);

        doc.groups.push(g1);
        doc.groups.push(g3);
        doc
    }

    #[test]
    fn test_collect_all_order() {
        let doc = sample();
        let widths: Vec<f64> = doc
            .collect_all(ElementKind::Rectangle)
            .iter()
            .filter_map(|e| e.as_rectangle())
            .map(|r| r.width)
            .collect();
        assert_eq!(widths, vec![2.0, 1.0, 2.0]);

        let radii: Vec<f64> = doc
            .collect_all(ElementKind::Circle)
            .iter()
            .filter_map(|e| e.as_circle())
            .map(|c| c.r)
            .collect();
        assert_eq!(radii, vec![5.0, 5.0, 1.0]);

        let group_lens: Vec<usize> = doc
            .collect_all(ElementKind::Group)
            .iter()
            .filter_map(|e| e.as_group())
            .map(|g| g.len())
            .collect();
        assert_eq!(group_lens, vec![4, 0, 2, 1]);
    }

    #[test]
    fn test_collect_all_matches_always_true_count() {
        let doc = sample();
        for kind in [
            ElementKind::Rectangle,
            ElementKind::Circle,
            ElementKind::Path,
            ElementKind::Group,
        ] {
            assert_eq!(doc.collect_all(kind).len(), doc.count_matching(kind, |_| true));
        }
        assert!(doc.collect_all(ElementKind::Svg).is_empty());
    }

    #[test]
    fn test_circle_area_uses_ceiling() {
        let doc = sample();
        assert_eq!(doc.circles_with_area(79.0), 2);
        assert_eq!(doc.circles_with_area(78.2), 2);
        assert_eq!(doc.circles_with_area(78.0), 0);
        assert_eq!(doc.circles_with_area(-1.0), 0);
    }

    #[test]
    fn test_rect_area() {
        let doc = sample();
        assert_eq!(doc.rects_with_area(6.0), 1);
        assert_eq!(doc.rects_with_area(4.0), 1);
        assert_eq!(doc.rects_with_area(0.5), 1);
        assert_eq!(doc.rects_with_area(7.0), 0);
    }

    #[test]
    fn test_paths_with_data() {
        let doc = sample();
        assert_eq!(doc.paths_with_data("M0"), 2);
        assert_eq!(doc.paths_with_data("m0"), 0);
    }

    #[test]
    fn test_groups_with_len() {
        let doc = sample();
        assert_eq!(doc.groups_with_len(4), 1);
        assert_eq!(doc.groups_with_len(0), 1);
        assert_eq!(doc.groups_with_len(3), 0);
    }

    #[test]
    fn test_count_attributes() {
        let doc = sample();
        // width on the document, id on g1, fill on the small rectangle
        assert_eq!(doc.count_attributes(), 3);
    }

    #[test]
    fn test_empty_document_counts_zero() {
        let doc = Document::new(SVG_NAMESPACE);
        assert_eq!(doc.rects_with_area(0.0), 0);
        assert_eq!(doc.groups_with_len(0), 0);
        assert_eq!(doc.count_attributes(), 0);
    }
}
