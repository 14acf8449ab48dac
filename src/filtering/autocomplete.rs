use super::query_parser::FilterQuery;

/// Tag vocabulary offered while typing.
pub const DEFAULT_AUTOCOMPLETE_OPTIONS: &[&str] = &[
    "is:seasonmod",
    "is:godroll",
    "is:fixme",
    "is:light>=",
    "is:stattotal>=",
    "is:postmaster",
    "is:godrollpve",
    "is:godrollpvp",
    "is:masterwork",
    "is:light<=",
    "is:light>",
    "is:light<",
    "is:light=",
    "is:stattotal<=",
    "is:stattotal>",
    "is:stattotal<",
    "is:stattotal=",
    "is:random",
    "is:fixed",
    "is:hasmod",
    "is:locked",
    "is:unlocked",
    "is:extratagged",
    "season:worthy",
    "season:undying",
    "season:dawn",
    "season:opulence",
    "season:forge",
    "season:outlaw",
];

/// Fragments must start with one of these before suggestions are offered.
/// `sea` covers every partial spelling of `season:`.
const TAG_FAMILY_PREFIXES: [&str; 2] = ["is:", "sea"];

/// Whether `fragment` belongs to a tag family that has suggestions
#[must_use]
pub fn is_tag_fragment(fragment: &str) -> bool {
    TAG_FAMILY_PREFIXES.iter().any(|p| fragment.starts_with(p))
}

/// Options whose text starts with the query's last fragment, in vocabulary order.
#[must_use]
pub fn suggestions<'o>(query: &FilterQuery, options: &'o [String]) -> Vec<&'o str> {
    let Some(fragment) = query.last_fragment().map(|t| t.as_str()) else {
        return Vec::new();
    };
    if !is_tag_fragment(fragment) {
        return Vec::new();
    }
    options
        .iter()
        .map(String::as_str)
        .filter(|o| o.starts_with(fragment))
        .collect()
}

/// Suggestion list that is only recomputed when the last fragment changes.
#[derive(Debug, Clone)]
pub struct Autocomplete {
    options: Vec<String>,
    fragment: Option<String>,
    current: Vec<String>,
}

impl Default for Autocomplete {
    fn default() -> Self {
        Self::new(DEFAULT_AUTOCOMPLETE_OPTIONS.iter().map(|s| (*s).to_string()).collect())
    }
}

impl Autocomplete {
    #[must_use]
    pub fn new(options: Vec<String>) -> Self {
        Self {
            options,
            fragment: None,
            current: Vec::new(),
        }
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Current suggestions
    #[must_use]
    pub fn current(&self) -> &[String] {
        &self.current
    }

    /// Refresh for `query`. Returns true if the list was recomputed.
    pub fn update(&mut self, query: &FilterQuery) -> bool {
        let fragment = query.last_fragment().map(|t| t.as_str().to_string());
        if fragment == self.fragment {
            return false;
        }
        self.current = suggestions(query, &self.options)
            .into_iter()
            .map(str::to_string)
            .collect();
        self.fragment = fragment;
        true
    }

    pub fn clear(&mut self) {
        self.fragment = None;
        self.current.clear();
    }
}
