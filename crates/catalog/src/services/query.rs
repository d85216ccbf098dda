//! Filtering and sorting over an item snapshot.
//!
//! [`filter_and_sort`] is a pure function of (snapshot, query): handlers
//! fetch the full collection from the store, run it through here, and
//! return the result. Nothing in this module touches the store.
//!
//! Sort descriptors arrive as `"field"` or `"field,direction"` strings and
//! are parsed up front into [`SortKey`]s; a bad descriptor rejects the whole
//! request before any comparison runs.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

use crate::models::Item;

/// A sortable item field.
///
/// The fixed set of fields the comparator knows about. Anything else in a
/// sort descriptor is a client error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Name,
    Price,
    Quantity,
}

impl FromStr for SortField {
    type Err = SortParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(Self::Name),
            "price" => Ok(Self::Price),
            "quantity" => Ok(Self::Quantity),
            _ => Err(SortParseError::UnknownField(s.to_owned())),
        }
    }
}

/// Sort direction, tri-state.
///
/// `Unordered` ("none") keys are dropped from the chain entirely, exactly
/// as if the field had not been mentioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
    Unordered,
}

impl FromStr for SortDirection {
    type Err = SortParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(Self::Ascending)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(Self::Descending)
        } else if s.eq_ignore_ascii_case("none") {
            Ok(Self::Unordered)
        } else {
            Err(SortParseError::UnknownDirection(s.to_owned()))
        }
    }
}

/// One parsed sort descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: SortField,
    pub direction: SortDirection,
}

impl FromStr for SortKey {
    type Err = SortParseError;

    /// Parse `"field"` or `"field,direction"`. A bare field sorts ascending.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split(',');
        let field = match parts.next() {
            Some(f) if !f.trim().is_empty() => f.trim().parse::<SortField>()?,
            _ => return Err(SortParseError::Malformed(s.to_owned())),
        };
        let direction = match parts.next() {
            Some(d) => d.trim().parse::<SortDirection>()?,
            None => SortDirection::Ascending,
        };
        if parts.next().is_some() {
            return Err(SortParseError::Malformed(s.to_owned()));
        }
        Ok(Self { field, direction })
    }
}

/// Error parsing a sort descriptor.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SortParseError {
    #[error("unknown sort field: {0}")]
    UnknownField(String),
    #[error("unknown sort direction: {0}")]
    UnknownDirection(String),
    #[error("malformed sort parameter: {0:?}")]
    Malformed(String),
}

/// A filter/sort request over the item collection.
///
/// Mirrors the shop front-end's filter bar: price bounds, category,
/// in-stock toggle, tag search, and an ordered list of sort descriptors.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemFilterRequest {
    pub sort: Option<Vec<String>>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub category: Option<String>,
    pub in_stock: Option<bool>,
    pub search_term: Option<String>,
}

/// A validated filter/sort query, ready for [`filter_and_sort`].
#[derive(Debug, Clone, Default)]
pub struct ItemQuery {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub category: Option<String>,
    pub in_stock: Option<bool>,
    pub search_term: Option<String>,
    pub sort: Vec<SortKey>,
}

impl TryFrom<ItemFilterRequest> for ItemQuery {
    type Error = SortParseError;

    fn try_from(req: ItemFilterRequest) -> Result<Self, Self::Error> {
        let sort = req
            .sort
            .unwrap_or_default()
            .iter()
            .map(|s| s.parse::<SortKey>())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            min_price: req.min_price,
            max_price: req.max_price,
            category: req.category,
            in_stock: req.in_stock,
            search_term: req.search_term,
            sort,
        })
    }
}

/// Filter an item snapshot, then sort the survivors.
///
/// All filters are conjunctive. An item missing a field referenced by an
/// active filter fails that filter; no filter ever faults on a missing
/// field. Sorting is stable for items equal on every active key.
#[must_use]
pub fn filter_and_sort(items: Vec<Item>, query: &ItemQuery) -> Vec<Item> {
    let category = query
        .category
        .as_deref()
        .filter(|c| !c.is_empty())
        .map(str::to_lowercase);
    let search_term = query
        .search_term
        .as_deref()
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase);

    let mut kept: Vec<Item> = items
        .into_iter()
        .filter(|item| {
            if let Some(min) = query.min_price
                && !item.price.is_some_and(|p| p >= min)
            {
                return false;
            }
            if let Some(max) = query.max_price
                && !item.price.is_some_and(|p| p <= max)
            {
                return false;
            }
            if let Some(wanted) = &category
                && item
                    .category
                    .as_deref()
                    .is_none_or(|c| c.to_lowercase() != *wanted)
            {
                return false;
            }
            if query.in_stock == Some(true) && !item.quantity.is_some_and(|q| q > 0) {
                return false;
            }
            if let Some(term) = &search_term
                && !item
                    .tags
                    .as_ref()
                    .is_some_and(|tags| tags.iter().any(|t| t.to_lowercase() == *term))
            {
                return false;
            }
            true
        })
        .collect();

    sort_items(&mut kept, &query.sort);
    kept
}

/// Sort items in place by the active keys of `sort`.
///
/// Keys with `Unordered` direction are dropped. The remaining keys compare
/// lexicographically: first key primary, later keys break ties in order.
/// The direction belongs to the chain as a whole and comes from the first
/// active key; directions on later keys do not flip their own field. That
/// is the ordering the shop client has always received, so it stays.
fn sort_items(items: &mut [Item], sort: &[SortKey]) {
    let active: Vec<&SortKey> = sort
        .iter()
        .filter(|key| key.direction != SortDirection::Unordered)
        .collect();
    let Some(first) = active.first() else {
        return;
    };
    let descending = first.direction == SortDirection::Descending;

    items.sort_by(|a, b| {
        let mut ord = Ordering::Equal;
        for key in &active {
            ord = compare_field(a, b, key.field);
            if ord != Ordering::Equal {
                break;
            }
        }
        if descending { ord.reverse() } else { ord }
    });
}

/// Compare one field of two items, ascending, missing values first.
fn compare_field(a: &Item, b: &Item, field: SortField) -> Ordering {
    match field {
        SortField::Name => a.name.cmp(&b.name),
        SortField::Price => compare_price(a.price, b.price),
        SortField::Quantity => a.quantity.cmp(&b.quantity),
    }
}

fn compare_price(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => x.total_cmp(&y),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sahara_core::ItemId;

    fn item(id: i32) -> Item {
        Item {
            id: ItemId::new(id),
            name: None,
            price: None,
            quantity: None,
            image_url: None,
            color: None,
            category: None,
            tags: None,
            stock_available: None,
        }
    }

    fn priced(id: i32, price: f64) -> Item {
        Item {
            price: Some(price),
            ..item(id)
        }
    }

    fn named_priced(id: i32, name: &str, price: f64) -> Item {
        Item {
            name: Some(name.to_owned()),
            price: Some(price),
            ..item(id)
        }
    }

    fn query() -> ItemQuery {
        ItemQuery::default()
    }

    fn sort_keys(specs: &[&str]) -> Vec<SortKey> {
        specs.iter().map(|s| s.parse().unwrap()).collect()
    }

    fn names(items: &[Item]) -> Vec<&str> {
        items
            .iter()
            .map(|i| i.name.as_deref().unwrap_or(""))
            .collect()
    }

    // --- filtering ---

    #[test]
    fn test_min_price_keeps_items_at_or_above_bound() {
        let items = vec![priced(1, 5.0), priced(2, 15.0)];
        let result = filter_and_sort(
            items,
            &ItemQuery {
                min_price: Some(10.0),
                ..query()
            },
        );
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].price, Some(15.0));
    }

    #[test]
    fn test_min_price_is_inclusive() {
        let items = vec![priced(1, 10.0)];
        let result = filter_and_sort(
            items,
            &ItemQuery {
                min_price: Some(10.0),
                ..query()
            },
        );
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_max_price_keeps_items_at_or_below_bound() {
        let items = vec![priced(1, 5.0), priced(2, 15.0), priced(3, 8.0)];
        let result = filter_and_sort(
            items,
            &ItemQuery {
                max_price: Some(8.0),
                ..query()
            },
        );
        assert_eq!(result.iter().map(|i| i.id.as_i32()).collect::<Vec<_>>(), [1, 3]);
    }

    #[test]
    fn test_price_filter_excludes_items_without_a_price() {
        let items = vec![item(1), priced(2, 15.0)];
        let result = filter_and_sort(
            items,
            &ItemQuery {
                min_price: Some(1.0),
                ..query()
            },
        );
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id.as_i32(), 2);
    }

    #[test]
    fn test_category_filter_is_case_insensitive() {
        let mut a = item(1);
        a.category = Some("Writing".to_owned());
        let mut b = item(2);
        b.category = Some("drawing".to_owned());
        let result = filter_and_sort(
            vec![a, b],
            &ItemQuery {
                category: Some("wRiTiNg".to_owned()),
                ..query()
            },
        );
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id.as_i32(), 1);
    }

    #[test]
    fn test_empty_category_is_no_filter() {
        let mut a = item(1);
        a.category = Some("writing".to_owned());
        let b = item(2);
        let result = filter_and_sort(
            vec![a, b],
            &ItemQuery {
                category: Some(String::new()),
                ..query()
            },
        );
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_in_stock_true_requires_positive_quantity() {
        let mut a = item(1);
        a.quantity = Some(0);
        let mut b = item(2);
        b.quantity = Some(3);
        let c = item(3); // no quantity at all
        let result = filter_and_sort(
            vec![a, b, c],
            &ItemQuery {
                in_stock: Some(true),
                ..query()
            },
        );
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id.as_i32(), 2);
    }

    #[test]
    fn test_in_stock_false_filters_nothing() {
        let mut a = item(1);
        a.quantity = Some(0);
        let b = item(2);
        let result = filter_and_sort(
            vec![a, b],
            &ItemQuery {
                in_stock: Some(false),
                ..query()
            },
        );
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_search_term_matches_whole_tags_case_insensitively() {
        let mut a = item(1);
        a.tags = Some(vec!["Ink".to_owned(), "refill".to_owned()]);
        let mut b = item(2);
        b.tags = Some(vec!["inkwell".to_owned()]); // substring must not match
        let c = item(3); // no tags
        let result = filter_and_sort(
            vec![a, b, c],
            &ItemQuery {
                search_term: Some("ink".to_owned()),
                ..query()
            },
        );
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id.as_i32(), 1);
    }

    #[test]
    fn test_filters_are_conjunctive_and_commutative() {
        let mut a = named_priced(1, "Pen", 12.0);
        a.quantity = Some(4);
        a.category = Some("writing".to_owned());
        let mut b = named_priced(2, "Pencil", 2.0);
        b.quantity = Some(9);
        b.category = Some("writing".to_owned());
        let mut c = named_priced(3, "Brush", 14.0);
        c.quantity = Some(0);
        c.category = Some("drawing".to_owned());
        let items = vec![a, b, c];

        let q = ItemQuery {
            min_price: Some(5.0),
            in_stock: Some(true),
            category: Some("writing".to_owned()),
            ..query()
        };
        let result = filter_and_sort(items.clone(), &q);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id.as_i32(), 1);

        // Same predicates expressed one at a time, any order: same subset.
        let by_stock = filter_and_sort(
            items,
            &ItemQuery {
                in_stock: Some(true),
                ..query()
            },
        );
        let by_stock_then_cat = filter_and_sort(
            by_stock,
            &ItemQuery {
                category: Some("writing".to_owned()),
                ..query()
            },
        );
        let chained = filter_and_sort(
            by_stock_then_cat,
            &ItemQuery {
                min_price: Some(5.0),
                ..query()
            },
        );
        assert_eq!(chained, result);
    }

    // --- sorting ---

    #[test]
    fn test_sort_price_ascending() {
        let items = vec![priced(1, 9.0), priced(2, 3.0), priced(3, 6.0)];
        let result = filter_and_sort(
            items,
            &ItemQuery {
                sort: sort_keys(&["price,asc"]),
                ..query()
            },
        );
        assert_eq!(result.iter().map(|i| i.price.unwrap()).collect::<Vec<_>>(), [3.0, 6.0, 9.0]);
    }

    #[test]
    fn test_sort_descending_chain_with_name_tiebreak() {
        let items = vec![
            named_priced(1, "B", 10.0),
            named_priced(2, "A", 10.0),
            named_priced(3, "C", 20.0),
        ];
        let result = filter_and_sort(
            items,
            &ItemQuery {
                sort: sort_keys(&["price,desc", "name,asc"]),
                ..query()
            },
        );
        // The chain direction comes from the first active key, so the name
        // tiebreak runs descending too.
        assert_eq!(names(&result), ["C", "B", "A"]);
    }

    #[test]
    fn test_sort_ascending_chain_with_tiebreak() {
        let items = vec![
            named_priced(1, "B", 10.0),
            named_priced(2, "C", 20.0),
            named_priced(3, "A", 10.0),
        ];
        let result = filter_and_sort(
            items,
            &ItemQuery {
                sort: sort_keys(&["price,asc", "name,asc"]),
                ..query()
            },
        );
        assert_eq!(names(&result), ["A", "B", "C"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let mut first = named_priced(1, "Same", 5.0);
        first.color = Some("red".to_owned());
        let mut second = named_priced(2, "Same", 5.0);
        second.color = Some("blue".to_owned());
        let result = filter_and_sort(
            vec![first, second],
            &ItemQuery {
                sort: sort_keys(&["price,desc", "name,asc"]),
                ..query()
            },
        );
        assert_eq!(result[0].color.as_deref(), Some("red"));
        assert_eq!(result[1].color.as_deref(), Some("blue"));
    }

    #[test]
    fn test_none_direction_is_equivalent_to_omitting_the_key() {
        let items = vec![
            named_priced(1, "B", 10.0),
            named_priced(2, "A", 10.0),
            named_priced(3, "C", 20.0),
        ];
        let with_none = filter_and_sort(
            items.clone(),
            &ItemQuery {
                sort: sort_keys(&["name,none", "price,desc"]),
                ..query()
            },
        );
        let without = filter_and_sort(
            items,
            &ItemQuery {
                sort: sort_keys(&["price,desc"]),
                ..query()
            },
        );
        assert_eq!(with_none, without);
        assert_eq!(names(&with_none), ["C", "B", "A"]);
    }

    #[test]
    fn test_all_none_sort_keeps_input_order() {
        let items = vec![priced(1, 9.0), priced(2, 3.0)];
        let result = filter_and_sort(
            items,
            &ItemQuery {
                sort: sort_keys(&["name,none", "price,none"]),
                ..query()
            },
        );
        assert_eq!(result.iter().map(|i| i.id.as_i32()).collect::<Vec<_>>(), [1, 2]);
    }

    #[test]
    fn test_sort_by_quantity() {
        let mut a = item(1);
        a.quantity = Some(7);
        let mut b = item(2);
        b.quantity = Some(2);
        let result = filter_and_sort(
            vec![a, b],
            &ItemQuery {
                sort: sort_keys(&["quantity,asc"]),
                ..query()
            },
        );
        assert_eq!(result.iter().map(|i| i.quantity.unwrap()).collect::<Vec<_>>(), [2, 7]);
    }

    #[test]
    fn test_missing_values_sort_before_present_ones() {
        let items = vec![priced(1, 5.0), item(2)];
        let result = filter_and_sort(
            items,
            &ItemQuery {
                sort: sort_keys(&["price,asc"]),
                ..query()
            },
        );
        assert_eq!(result.iter().map(|i| i.id.as_i32()).collect::<Vec<_>>(), [2, 1]);
    }

    // --- descriptor parsing ---

    #[test]
    fn test_parse_field_and_direction() {
        assert_eq!(
            "price,desc".parse::<SortKey>().unwrap(),
            SortKey {
                field: SortField::Price,
                direction: SortDirection::Descending,
            }
        );
    }

    #[test]
    fn test_parse_bare_field_defaults_to_ascending() {
        let key = "name".parse::<SortKey>().unwrap();
        assert_eq!(key.direction, SortDirection::Ascending);
    }

    #[test]
    fn test_parse_direction_is_case_insensitive() {
        let key = "price,DESC".parse::<SortKey>().unwrap();
        assert_eq!(key.direction, SortDirection::Descending);
    }

    #[test]
    fn test_parse_rejects_unknown_field() {
        let err = "weight,asc".parse::<SortKey>().unwrap_err();
        assert_eq!(err, SortParseError::UnknownField("weight".to_owned()));
    }

    #[test]
    fn test_parse_rejects_unknown_direction() {
        let err = "price,down".parse::<SortKey>().unwrap_err();
        assert_eq!(err, SortParseError::UnknownDirection("down".to_owned()));
    }

    #[test]
    fn test_parse_rejects_wrong_arity() {
        assert!(matches!(
            "price,desc,extra".parse::<SortKey>(),
            Err(SortParseError::Malformed(_))
        ));
        assert!(matches!(
            "".parse::<SortKey>(),
            Err(SortParseError::Malformed(_))
        ));
    }

    #[test]
    fn test_request_with_bad_sort_rejects_whole_query() {
        let req = ItemFilterRequest {
            sort: Some(vec!["price,asc".to_owned(), "weight,asc".to_owned()]),
            ..ItemFilterRequest::default()
        };
        assert!(ItemQuery::try_from(req).is_err());
    }
}
