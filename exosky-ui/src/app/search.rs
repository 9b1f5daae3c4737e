/// Names containing `query`, ignoring case, in the order given.
pub fn filter_names<'a, S: AsRef<str>>(names: &'a [S], query: &str) -> Vec<&'a str> {
    let query = query.to_lowercase();
    names
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| name.to_lowercase().contains(&query))
        .collect()
}

/// Search box over a fixed list of names.
#[derive(Clone, Debug, Default)]
pub struct SearchList {
    names: Vec<String>,
    query: String,
}

impl SearchList {
    pub fn new(names: Vec<String>) -> Self {
        Self {
            names,
            query: String::new(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// An empty query lists every name.
    pub fn results(&self) -> Vec<&str> {
        filter_names(&self.names, &self.query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_filters_case_insensitively() {
        let names = ["Kepler-1", "Kepler-2", "TOI-700"];
        assert_eq!(filter_names(&names, "kepler"), vec!["Kepler-1", "Kepler-2"]);
        assert_eq!(filter_names(&names, "700"), vec!["TOI-700"]);
        assert!(filter_names(&names, "wasp").is_empty());
    }

    #[test]
    fn empty_query_matches_everything() {
        let list = SearchList::new(vec!["b".to_owned(), "a".to_owned()]);
        assert_eq!(list.results(), vec!["b", "a"]);
    }

    #[test]
    fn it_updates_results_with_the_query() {
        let mut list = SearchList::new(vec![
            "Kepler-22 b".to_owned(),
            "Proxima Cen b".to_owned(),
            "TOI-700 d".to_owned(),
        ]);
        list.set_query("B");
        assert_eq!(list.results(), vec!["Kepler-22 b", "Proxima Cen b"]);
        assert_eq!(list.query(), "B");
    }
}
