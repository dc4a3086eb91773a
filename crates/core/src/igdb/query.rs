//! Request bodies in the service's query language (Apicalypse).

use crate::models::Id;

/// Builder for the service's query language.
///
/// ```
/// use igdb_fetch_core::igdb::Query;
///
/// let body = Query::new().fields(&["name"]).where_id(48).build();
/// assert_eq!(body, "fields name; where id = 48;");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Query {
    search: Option<String>,
    fields: Vec<String>,
    ids: Vec<Id>,
    limit: Option<u32>,
}

impl Query {
    /// Empty query; renders `fields *;` when no fields are added.
    pub fn new() -> Self {
        Self::default()
    }

    /// Full-text search term.
    pub fn search(mut self, term: &str) -> Self {
        self.search = Some(term.to_string());
        self
    }

    /// Fields to return.
    pub fn fields(mut self, fields: &[&str]) -> Self {
        self.fields.extend(fields.iter().map(|field| field.to_string()));
        self
    }

    /// Restrict to a single record.
    pub fn where_id(self, id: Id) -> Self {
        self.where_ids(&[id])
    }

    /// Restrict to a set of records.
    pub fn where_ids(mut self, ids: &[Id]) -> Self {
        self.ids.extend_from_slice(ids);
        self
    }

    /// Maximum number of records.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Render the request body.
    pub fn build(&self) -> String {
        let mut body = String::new();
        if let Some(term) = &self.search {
            body.push_str(&format!("search \"{}\"; ", escape(term)));
        }

        if self.fields.is_empty() {
            body.push_str("fields *;");
        } else {
            body.push_str(&format!("fields {};", self.fields.join(",")));
        }

        match self.ids.as_slice() {
            [] => {}
            [id] => body.push_str(&format!(" where id = {id};")),
            ids => {
                let joined = ids
                    .iter()
                    .map(|id| id.to_string())
                    .collect::<Vec<_>>()
                    .join(",");
                body.push_str(&format!(" where id = ({joined});"));
            }
        }

        if let Some(limit) = self.limit {
            body.push_str(&format!(" limit {limit};"));
        }
        body
    }
}

fn escape(term: &str) -> String {
    term.replace('\\', "\\\\").replace('"', "\\\"")
}
