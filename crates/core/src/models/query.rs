use serde::{Deserialize, Serialize};

use super::zodiac::ZodiacSign;

/// Server-side sort key for chart listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    CreatedAt,
    Name,
    BirthDate,
    SunSign,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::CreatedAt => "createdAt",
            SortField::Name => "name",
            SortField::BirthDate => "birthDate",
            SortField::SunSign => "sunSign",
        }
    }
}

/// Sort direction, passed straight to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Parameters of `GET /charts`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartQuery {
    /// 1-based.
    pub page: u32,
    pub limit: u32,
    /// Applied server-side; `None` means no filter.
    pub sun_sign: Option<ZodiacSign>,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
}

impl Default for ChartQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            sun_sign: None,
            sort_by: SortField::default(),
            sort_order: SortOrder::default(),
        }
    }
}

impl ChartQuery {
    /// Query-string pairs in the order the API documents them.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
            ("sortBy", self.sort_by.as_str().to_string()),
            ("sortOrder", self.sort_order.as_str().to_string()),
        ];
        if let Some(sign) = self.sun_sign {
            pairs.push(("sunSign", sign.as_str().to_string()));
        }
        pairs
    }

    /// Same query, different page.
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }
}
