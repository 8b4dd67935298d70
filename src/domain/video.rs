use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A hosted video's metadata record.
///
/// URL fields stay `None` until the corresponding upload pipeline has fully
/// succeeded. Only the owning user may mutate a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    pub video_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Video {
    /// Create a draft record with no uploaded media yet.
    pub fn new(user_id: Uuid, title: String, description: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            title,
            description,
            thumbnail_url: None,
            video_url: None,
            created_at: Utc::now(),
        }
    }
}

/// Orientation label derived from the first stream's dimensions.
///
/// Used as the object key prefix so storage is namespaced by orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Wide,
    Tall,
    Unclassified,
}

impl Orientation {
    /// Classify from pixel dimensions. Zero dimensions and exact squares are
    /// unclassified.
    pub fn from_dimensions(width: u32, height: u32) -> Self {
        if width == 0 || height == 0 {
            return Orientation::Unclassified;
        }
        if width > height {
            Orientation::Wide
        } else if width < height {
            Orientation::Tall
        } else {
            Orientation::Unclassified
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Wide => "wide",
            Orientation::Tall => "tall",
            Orientation::Unclassified => "unclassified",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landscape_dimensions_classify_wide() {
        assert_eq!(Orientation::from_dimensions(1920, 1080), Orientation::Wide);
        assert_eq!(Orientation::from_dimensions(2, 1), Orientation::Wide);
    }

    #[test]
    fn portrait_dimensions_classify_tall() {
        assert_eq!(Orientation::from_dimensions(1080, 1920), Orientation::Tall);
        assert_eq!(Orientation::from_dimensions(1, 2), Orientation::Tall);
    }

    #[test]
    fn square_is_unclassified() {
        assert_eq!(
            Orientation::from_dimensions(1080, 1080),
            Orientation::Unclassified
        );
    }

    #[test]
    fn zero_dimension_is_unclassified() {
        assert_eq!(
            Orientation::from_dimensions(0, 1080),
            Orientation::Unclassified
        );
        assert_eq!(
            Orientation::from_dimensions(1920, 0),
            Orientation::Unclassified
        );
        assert_eq!(Orientation::from_dimensions(0, 0), Orientation::Unclassified);
    }

    #[test]
    fn classification_is_deterministic() {
        for _ in 0..3 {
            assert_eq!(Orientation::from_dimensions(1920, 1080), Orientation::Wide);
        }
    }

    #[test]
    fn label_strings() {
        assert_eq!(Orientation::Wide.as_str(), "wide");
        assert_eq!(Orientation::Tall.as_str(), "tall");
        assert_eq!(Orientation::Unclassified.as_str(), "unclassified");
    }

    #[test]
    fn new_video_has_no_media_urls() {
        let video = Video::new(Uuid::new_v4(), "title".into(), None);
        assert!(video.thumbnail_url.is_none());
        assert!(video.video_url.is_none());
    }
}
