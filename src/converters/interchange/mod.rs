//! Compact JSON interchange form
//!
//! Each entity maps to a flat record: geometry rounded to two decimals and
//! the attribute set reduced to its count. Decoding is partial and lossy;
//! only geometry, units and document title/description come back.
//!
//! ```text
//! rect    {"x":1.0,"y":2.0,"w":3.0,"h":4.0,"numAttr":0,"units":"cm"}
//! circle  {"cx":1.0,"cy":2.0,"r":3.0,"numAttr":1,"units":""}
//! path    {"d":"M 0 0 L 10 10","numAttr":0}
//! group   {"children":3,"numAttr":1}
//! svg     {"numRect":2,"numCirc":0,"numPaths":1,"numGroups":1}
//! ```

use serde::{Deserialize, Serialize, Serializer};

use crate::errors::{Result, SvgError};
use crate::models::{
    Attribute, AttributeSet, Circle, Document, ElementKind, ElementRef, Group, Path, Rectangle, Shape,
    Unit, SVG_NAMESPACE,
};

/// Path data beyond this many characters is cut from path records
pub const PATH_DATA_LIMIT: usize = 64;

/// Values too large to scale by 100 have no fractional digits left to round
fn two_decimals<S: Serializer>(value: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    let scaled = value * 100.0;
    let rounded = if scaled.is_finite() { scaled.round() / 100.0 } else { *value };
    serializer.serialize_f64(rounded)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RectRecord {
    #[serde(serialize_with = "two_decimals")]
    pub x: f64,
    #[serde(serialize_with = "two_decimals")]
    pub y: f64,
    #[serde(rename = "w", serialize_with = "two_decimals")]
    pub width: f64,
    #[serde(rename = "h", serialize_with = "two_decimals")]
    pub height: f64,
    #[serde(rename = "numAttr")]
    pub num_attr: usize,
    pub units: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircleRecord {
    #[serde(serialize_with = "two_decimals")]
    pub cx: f64,
    #[serde(serialize_with = "two_decimals")]
    pub cy: f64,
    #[serde(serialize_with = "two_decimals")]
    pub r: f64,
    #[serde(rename = "numAttr")]
    pub num_attr: usize,
    pub units: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathRecord {
    pub d: String,
    #[serde(rename = "numAttr")]
    pub num_attr: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupRecord {
    pub children: usize,
    #[serde(rename = "numAttr")]
    pub num_attr: usize,
}

/// Whole-tree entity counts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRecord {
    pub num_rect: usize,
    pub num_circ: usize,
    pub num_paths: usize,
    pub num_groups: usize,
}

/// Title and description of a document to be created
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentRecord {
    pub title: String,
    #[serde(rename = "descr")]
    pub description: String,
}

/// Any single-entity record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Record {
    Rect(RectRecord),
    Circle(CircleRecord),
    Path(PathRecord),
    Group(GroupRecord),
}

/// Conversion of a model entity into its interchange record
pub trait ToRecord {
    type Record: Serialize;

    fn to_record(&self) -> Self::Record;

    fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_record())?)
    }
}

impl ToRecord for Rectangle {
    type Record = RectRecord;

    fn to_record(&self) -> RectRecord {
        RectRecord {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
            num_attr: self.attributes.len(),
            units: self.units.to_string(),
        }
    }
}

impl ToRecord for Circle {
    type Record = CircleRecord;

    fn to_record(&self) -> CircleRecord {
        CircleRecord {
            cx: self.cx,
            cy: self.cy,
            r: self.r,
            num_attr: self.attributes.len(),
            units: self.units.to_string(),
        }
    }
}

impl ToRecord for Path {
    type Record = PathRecord;

    fn to_record(&self) -> PathRecord {
        PathRecord {
            d: self.data.chars().take(PATH_DATA_LIMIT).collect(),
            num_attr: self.attributes.len(),
        }
    }
}

impl ToRecord for Group {
    type Record = GroupRecord;

    fn to_record(&self) -> GroupRecord {
        GroupRecord {
            children: self.len(),
            num_attr: self.attributes.len(),
        }
    }
}

impl ToRecord for Attribute {
    type Record = Attribute;

    fn to_record(&self) -> Attribute {
        self.clone()
    }
}

impl ToRecord for Document {
    type Record = SummaryRecord;

    /// Counts cover the whole tree, not only the top level
    fn to_record(&self) -> SummaryRecord {
        SummaryRecord {
            num_rect: self.iter_kind(ElementKind::Rectangle).count(),
            num_circ: self.iter_kind(ElementKind::Circle).count(),
            num_paths: self.iter_kind(ElementKind::Path).count(),
            num_groups: self.iter_kind(ElementKind::Group).count(),
        }
    }
}

impl<'a> ToRecord for ElementRef<'a> {
    type Record = Record;

    fn to_record(&self) -> Record {
        match self {
            ElementRef::Rectangle(rect) => Record::Rect(rect.to_record()),
            ElementRef::Circle(circle) => Record::Circle(circle.to_record()),
            ElementRef::Path(path) => Record::Path(path.to_record()),
            ElementRef::Group(group) => Record::Group(group.to_record()),
        }
    }
}

/// JSON array of records, in list order
pub fn list_to_json<T: ToRecord>(items: &[T]) -> Result<String> {
    let records: Vec<T::Record> = items.iter().map(ToRecord::to_record).collect();
    Ok(serde_json::to_string(&records)?)
}

pub fn attributes_to_json(attributes: &AttributeSet) -> Result<String> {
    Ok(serde_json::to_string(attributes)?)
}

/// Attribute lists of every top-level entity of `kind`, each followed by `|`.
///
/// `ElementKind::Svg` yields the document's own list.
pub fn top_level_attributes_json(doc: &Document, kind: ElementKind) -> Result<String> {
    let sets: Vec<&AttributeSet> = match kind {
        ElementKind::Svg => vec![&doc.attributes],
        ElementKind::Rectangle => doc.rectangles.iter().map(|r| &r.attributes).collect(),
        ElementKind::Circle => doc.circles.iter().map(|c| &c.attributes).collect(),
        ElementKind::Path => doc.paths.iter().map(|p| &p.attributes).collect(),
        ElementKind::Group => doc.groups.iter().map(|g| &g.attributes).collect(),
    };

    let mut out = String::new();
    for set in sets {
        out.push_str(&attributes_to_json(set)?);
        out.push('|');
    }
    Ok(out)
}

/// Rectangle with geometry and unit from a record; no attributes
pub fn rect_from_json(json: &str) -> Result<Rectangle> {
    let record: RectRecord = serde_json::from_str(json)?;
    Ok(Rectangle::new(
        record.x,
        record.y,
        record.width,
        record.height,
        Unit::from_suffix(&record.units),
    ))
}

/// Circle with geometry and unit from a record; no attributes
pub fn circle_from_json(json: &str) -> Result<Circle> {
    let record: CircleRecord = serde_json::from_str(json)?;
    Ok(Circle::new(record.cx, record.cy, record.r, Unit::from_suffix(&record.units)))
}

/// Path with the record's data; no attributes
pub fn path_from_json(json: &str) -> Result<Path> {
    let record: PathRecord = serde_json::from_str(json)?;
    Ok(Path::new(record.d))
}

/// Decode a shape of the given kind
pub fn shape_from_json(kind: ElementKind, json: &str) -> Result<Shape> {
    match kind {
        ElementKind::Rectangle => Ok(rect_from_json(json)?.into()),
        ElementKind::Circle => Ok(circle_from_json(json)?.into()),
        ElementKind::Path => Ok(path_from_json(json)?.into()),
        other => Err(SvgError::Unsupported(format!("{} is not a shape", other))),
    }
}

/// Empty document in the SVG namespace with the given title and description
pub fn document_from_json(json: &str) -> Result<Document> {
    let record: DocumentRecord = serde_json::from_str(json)?;
    let mut doc = Document::new(SVG_NAMESPACE);
    doc.title = record.title;
    doc.description = record.description;
    Ok(doc)
}
