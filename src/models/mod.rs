use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Identifiers of the entity chain created by the pretest seed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PretestIds {
    pub parent_category_id: String,
    pub category_id: String,
    pub plant_id: String,
    pub sale_id: String,
}

impl PretestIds {
    /// Build a record from parsed JSON. All four keys must be present and
    /// non-null; numeric ids are normalized to strings.
    pub fn from_json(value: &Value) -> Option<Self> {
        let field = |key: &str| value.get(key).and_then(id_string);
        Some(PretestIds {
            parent_category_id: field("parentCategoryId")?,
            category_id: field("categoryId")?,
            plant_id: field("plantId")?,
            sale_id: field("saleId")?,
        })
    }
}

/// Render a JSON id (string or number) as a string. Anything else is `None`.
pub fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Payload for creating a plant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPlant {
    pub name: String,
    pub price: f64,
    pub quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub category_id: Option<i64>,
}

/// Payload for updating a plant. Unset fields are left out of the body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
}

/// Query options for `GET /api/categories`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub search: Option<String>,
    pub parent_id: Option<i64>,
    pub sort: Option<String>,
}

impl CategoryQuery {
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        if let Some(size) = self.size {
            params.push(("size", size.to_string()));
        }
        if let Some(ref search) = self.search {
            params.push(("search", search.clone()));
        }
        if let Some(parent_id) = self.parent_id {
            params.push(("parentId", parent_id.to_string()));
        }
        if let Some(ref sort) = self.sort {
            params.push(("sort", sort.clone()));
        }
        params
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDir {
    Asc,
    Desc,
}

impl SortDir {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDir::Asc => "asc",
            SortDir::Desc => "desc",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Some(SortDir::Asc),
            "desc" => Some(SortDir::Desc),
            _ => None,
        }
    }
}

impl fmt::Display for SortDir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Query options for `GET /api/sales/page`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SalesPageQuery {
    pub page: u32,
    pub size: u32,
    pub sort_field: Option<String>,
    pub sort_dir: Option<SortDir>,
}

impl SalesPageQuery {
    pub fn new(page: u32, size: u32) -> Self {
        SalesPageQuery {
            page,
            size,
            ..Default::default()
        }
    }

    /// Parse a step-style sort spec such as `"soldAt,desc"` or `"quantity"`.
    /// An unknown direction is dropped rather than sent.
    pub fn with_sort_spec(mut self, spec: &str) -> Self {
        let mut parts = spec.split(',').map(str::trim);
        self.sort_field = parts
            .next()
            .filter(|f| !f.is_empty())
            .map(|f| f.to_string());
        self.sort_dir = parts.next().and_then(SortDir::from_str);
        self
    }

    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("page", self.page.to_string()), ("size", self.size.to_string())];
        if let Some(ref field) = self.sort_field {
            let sort = match self.sort_dir {
                Some(dir) => format!("{field},{dir}"),
                None => field.clone(),
            };
            params.push(("sort", sort));
        }
        params
    }
}
