use serde::Deserialize;

pub mod competitions;
pub mod health;
pub mod import;
pub mod players;
pub mod teams;

// Query parameters shared by the list endpoints
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: Option<i64>,
}

impl ListQuery {
    /// SQLite treats a negative LIMIT as "no limit"
    pub fn limit(&self) -> i64 {
        self.limit.filter(|l| *l >= 0).unwrap_or(-1)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_query_defaults_to_everything() {
        let query = ListQuery { limit: None, offset: None };
        assert_eq!((query.limit(), query.offset()), (-1, 0));

        let query = ListQuery { limit: Some(-3), offset: Some(-2) };
        assert_eq!((query.limit(), query.offset()), (-1, 0));

        let query = ListQuery { limit: Some(10), offset: Some(20) };
        assert_eq!((query.limit(), query.offset()), (10, 20));
    }
}
