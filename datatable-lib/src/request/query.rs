//! Query string encoding for GET-style transports.

use crate::filter::FilterValue;

use super::FetchRequest;

impl FetchRequest {
    /// Flattens the request into ordered query parameters.
    ///
    /// Filters are encoded as `filter[<key>]` for text and select values,
    /// `filter[<key>][comparator]`/`filter[<key>][number]` for numbers and
    /// `filter[<key>][from]`/`filter[<key>][to]` for date ranges.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("pageSize".to_string(), self.page_size.to_string()),
        ];

        if let Some(sort) = &self.sort {
            pairs.push(("sortField".to_string(), sort.column.clone()));
            pairs.push(("sortOrder".to_string(), sort.direction.as_str().to_string()));
        }

        if let Some(search) = &self.search {
            pairs.push(("search".to_string(), search.term.clone()));
            pairs.push(("searchFields".to_string(), search.columns.join(",")));
        }

        for (key, value) in &self.filters {
            filter_pairs(key, value, &mut pairs);
        }

        pairs
    }
}

fn filter_pairs(key: &str, value: &FilterValue, pairs: &mut Vec<(String, String)>) {
    let name = format!("filter[{}]", key);
    match value {
        FilterValue::Text(text) | FilterValue::Select(text) => pairs.push((name, text.clone())),
        FilterValue::Number(number) => {
            pairs.push((
                format!("{}[comparator]", name),
                number.comparator_or_default().as_str().to_string(),
            ));
            if let Some(n) = number.number {
                pairs.push((format!("{}[number]", name), n.to_string()));
            }
        }
        FilterValue::DateRange(range) => {
            if let Some(from) = range.from {
                pairs.push((format!("{}[from]", name), from.format("%Y-%m-%d").to_string()));
            }
            if let Some(to) = range.to {
                pairs.push((format!("{}[to]", name), to.format("%Y-%m-%d").to_string()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::NaiveDate;

    use super::*;
    use crate::filter::Comparator;
    use crate::filter::NumberFilter;
    use crate::request::SearchParam;
    use crate::request::SortParam;
    use crate::sort::Direction;

    fn owned(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_page_only() {
        let request = FetchRequest {
            page: 3,
            page_size: 10,
            sort: None,
            search: None,
            filters: BTreeMap::new(),
        };
        assert_eq!(request.query_pairs(), owned(&[("page", "3"), ("pageSize", "10")]));
    }

    #[test]
    fn test_all_parameters() {
        let mut filters = BTreeMap::new();
        filters.insert("first_name".to_string(), FilterValue::text("Ted"));
        filters.insert(
            "request_id".to_string(),
            FilterValue::Number(NumberFilter {
                comparator: None,
                number: Some(66.0),
            }),
        );
        filters.insert(
            "created_at".to_string(),
            FilterValue::date_range(
                NaiveDate::from_ymd_opt(2017, 1, 1),
                NaiveDate::from_ymd_opt(2017, 1, 2),
            ),
        );

        let request = FetchRequest {
            page: 1,
            page_size: 10,
            sort: Some(SortParam {
                column: "request_id".to_string(),
                direction: Direction::Desc,
            }),
            search: Some(SearchParam {
                term: "ted".to_string(),
                columns: vec!["first_name".to_string(), "email".to_string()],
            }),
            filters,
        };

        assert_eq!(
            request.query_pairs(),
            owned(&[
                ("page", "1"),
                ("pageSize", "10"),
                ("sortField", "request_id"),
                ("sortOrder", "desc"),
                ("search", "ted"),
                ("searchFields", "first_name,email"),
                ("filter[created_at][from]", "2017-01-01"),
                ("filter[created_at][to]", "2017-01-02"),
                ("filter[first_name]", "Ted"),
                ("filter[request_id][comparator]", "="),
                ("filter[request_id][number]", "66"),
            ])
        );
        assert_eq!(Comparator::default().as_str(), "=");
    }
}
