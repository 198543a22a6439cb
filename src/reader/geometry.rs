// Geometry and image containers extracted from POI objects

/// A WGS84 position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryContent {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeometryContent {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Parse a `"lat lon"` position
    pub fn parse(position: &str) -> Option<Self> {
        let mut coordinates = position.split_whitespace().map(str::parse::<f64>);
        match (coordinates.next(), coordinates.next(), coordinates.next()) {
            (Some(Ok(latitude)), Some(Ok(longitude)), None) => Some(Self::new(latitude, longitude)),
            _ => None,
        }
    }

    /// Parse a comma-separated list of `"lat lon"` positions
    pub fn parse_list(pos_list: &str) -> Option<Vec<Self>> {
        pos_list.split(',').map(Self::parse).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(GeometryContent),
    Line {
        first: GeometryContent,
        second: GeometryContent,
    },
    Polygon(Vec<GeometryContent>),
}

impl Geometry {
    /// Number of positions in the geometry
    pub fn size(&self) -> usize {
        match self {
            Geometry::Point(_) => 1,
            Geometry::Line { .. } => 2,
            Geometry::Polygon(points) => points.len(),
        }
    }
}

/// An image either referenced by URI or embedded (e.g. base-64)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageContent {
    pub content: String,
    pub is_uri: bool,
}

impl ImageContent {
    pub fn uri(content: &str) -> Self {
        Self {
            content: content.to_string(),
            is_uri: true,
        }
    }

    pub fn inline(content: &str) -> Self {
        Self {
            content: content.to_string(),
            is_uri: false,
        }
    }
}
