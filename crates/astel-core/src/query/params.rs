use std::fmt::Display;
use url::form_urlencoded;

/// Ordered query parameters that skip empty values.
///
/// Text values are trimmed; a value that is absent or blank after trimming
/// is never emitted. Insertion order is preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter unconditionally.
    pub fn push(&mut self, key: &str, value: impl Display) -> &mut Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    /// Append a text parameter unless it is absent or blank.
    pub fn push_text(&mut self, key: &str, value: Option<&str>) -> &mut Self {
        if let Some(v) = value.map(str::trim).filter(|v| !v.is_empty()) {
            self.pairs.push((key.to_string(), v.to_string()));
        }
        self
    }

    /// Append a parameter when present.
    pub fn push_opt<T: Display>(&mut self, key: &str, value: Option<T>) -> &mut Self {
        if let Some(v) = value {
            let rendered = v.to_string();
            return self.push_text(key, Some(&rendered));
        }
        self
    }

    /// Append every parameter of `other`.
    pub fn extend(&mut self, other: Self) -> &mut Self {
        self.pairs.extend(other.pairs);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Render as an `application/x-www-form-urlencoded` query string.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (k, v) in &self.pairs {
            serializer.append_pair(k, v);
        }
        serializer.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_values_skipped() {
        let mut params = QueryParams::new();
        params
            .push_text("nome", Some("  "))
            .push_text("cpf", None)
            .push_opt::<u32>("matriculaAstel", None)
            .push_text("cidade", Some(" Recife "));
        assert_eq!(params.to_query_string(), "cidade=Recife");
    }

    #[test]
    fn test_encoding_matches_form_urlencoding() {
        let mut params = QueryParams::new();
        params
            .push_text("nome", Some("José da Silva"))
            .push_text("formapagamento", Some("FOLHA SISTEL MENSAL"));
        assert_eq!(
            params.to_query_string(),
            "nome=Jos%C3%A9+da+Silva&formapagamento=FOLHA+SISTEL+MENSAL"
        );
    }

    #[test]
    fn test_order_preserved() {
        let mut params = QueryParams::new();
        params.push("b", 2).push("a", 1);
        let keys: Vec<_> = params.pairs().map(|(k, _)| k).collect();
        assert_eq!(keys, ["b", "a"]);
        assert_eq!(params.get("a"), Some("1"));
        assert_eq!(params.len(), 2);
    }
}
