//! Questionnaire → parameterized `tb_wedding_hall` query.
//!
//! Templates are assembled only from the static fragments in this module and
//! placeholder names. Every value derived from a request travels in
//! [`QueryParams`] and is bound by the executing collaborator.

use serde::Serialize;

use crate::domain::questionnaire::{Budget, VenueQueryRequest};
use crate::domain::venue::VenueType;
use crate::errors::DomainError;

use super::mapper;

const SELECT_VENUES: &str =
    "SELECT name, venueType, parking, address, phone, imageUrl FROM tb_wedding_hall";
const HOTEL_FIRST: &str = " ORDER BY CASE WHEN venueType = 'HOTEL' THEN 0 ELSE 1 END, id";
const LIMIT_PARAM: &str = "limit";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum QueryValue {
    Int(i64),
    Text(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Column {
    Address,
    VenueType,
    Parking,
}

impl Column {
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Address => "address",
            Self::VenueType => "venueType",
            Self::Parking => "parking",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Like,
    In,
    AtLeast,
    AtMost,
    NotEqual,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Predicate {
    pub column: Column,
    pub operator: Operator,
    pub placeholders: Vec<String>,
}

impl Predicate {
    fn to_sql(&self) -> String {
        let column = self.column.as_sql();
        let slots: Vec<String> = self.placeholders.iter().map(|name| format!(":{name}")).collect();

        match self.operator {
            Operator::Like => format!("{column} LIKE {}", slots.join("")),
            Operator::In => format!("{column} IN ({})", slots.join(", ")),
            Operator::AtLeast => format!("{column} >= {}", slots.join("")),
            Operator::AtMost => format!("{column} <= {}", slots.join("")),
            Operator::NotEqual => format!("{column} != {}", slots.join("")),
        }
    }
}

/// Placeholder bindings in the order the placeholders appear in the template.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct QueryParams(Vec<(String, QueryValue)>);

impl QueryParams {
    fn insert(&mut self, name: impl Into<String>, value: QueryValue) {
        let name = name.into();
        debug_assert!(self.get(&name).is_none(), "placeholder `{name}` bound twice");
        self.0.push((name, value));
    }

    pub fn get(&self, name: &str) -> Option<&QueryValue> {
        self.0.iter().find(|(key, _)| key == name).map(|(_, value)| value)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|(key, _)| key == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &QueryValue)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Filter predicates built fresh for one request, with their bindings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PredicateSet {
    predicates: Vec<Predicate>,
    params: QueryParams,
}

impl PredicateSet {
    fn push(&mut self, column: Column, operator: Operator, placeholder: &str, value: QueryValue) {
        self.predicates.push(Predicate {
            column,
            operator,
            placeholders: vec![placeholder.to_string()],
        });
        self.params.insert(placeholder, value);
    }

    /// `venueType IN (...)` with one placeholder per type. No-op for an empty
    /// list.
    pub(crate) fn push_venue_types(&mut self, types: &[VenueType]) {
        if types.is_empty() {
            return;
        }

        let mut placeholders = Vec::with_capacity(types.len());
        for (index, venue_type) in types.iter().enumerate() {
            let name = format!("venue_type_{index}");
            self.params.insert(name.clone(), QueryValue::Text(venue_type.code().to_string()));
            placeholders.push(name);
        }
        self.predicates.push(Predicate {
            column: Column::VenueType,
            operator: Operator::In,
            placeholders,
        });
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn params(&self) -> &QueryParams {
        &self.params
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    fn where_clause(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        let conditions: Vec<String> = self.predicates.iter().map(Predicate::to_sql).collect();
        Some(format!(" WHERE {}", conditions.join(" AND ")))
    }
}

/// An executable statement: template, bindings, and the row cap it carries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct VenueQuery {
    pub sql: String,
    pub params: QueryParams,
    pub limit: u32,
}

impl VenueQuery {
    pub(crate) fn render(predicates: PredicateSet, hotel_first: bool, limit: u32) -> Self {
        let limit = limit.max(1);
        let where_clause = predicates.where_clause();
        let mut params = predicates.params;

        let mut sql = String::from(SELECT_VENUES);
        if let Some(clause) = where_clause {
            sql.push_str(&clause);
        }
        if hotel_first {
            sql.push_str(HOTEL_FIRST);
        }
        sql.push_str(" LIMIT :");
        sql.push_str(LIMIT_PARAM);
        params.insert(LIMIT_PARAM, QueryValue::Int(i64::from(limit)));

        Self { sql, params, limit }
    }

    /// Placeholder names referenced by the template, in order of appearance.
    pub fn placeholders(&self) -> Vec<&str> {
        segments(&self.sql)
            .into_iter()
            .filter_map(|segment| match segment {
                Segment::Placeholder(name) => Some(name),
                Segment::Text(_) => None,
            })
            .collect()
    }

    /// The template with each `:name` rewritten to `?N`, where `N` is the
    /// 1-based position of `name` in [`VenueQuery::params`]. Binding the
    /// params in order then satisfies every slot.
    pub fn to_numbered(&self) -> Result<String, DomainError> {
        let mut sql = String::with_capacity(self.sql.len());
        for segment in segments(&self.sql) {
            match segment {
                Segment::Text(text) => sql.push_str(text),
                Segment::Placeholder(name) => {
                    let position = self.params.position(name).ok_or_else(|| {
                        DomainError::InvariantViolation(format!(
                            "query references unbound placeholder `:{name}`"
                        ))
                    })?;
                    sql.push('?');
                    sql.push_str(&(position + 1).to_string());
                }
            }
        }
        Ok(sql)
    }
}

enum Segment<'a> {
    Text(&'a str),
    Placeholder(&'a str),
}

fn is_name_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn is_name_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

// Splits a template into literal text and `:name` placeholders, ignoring
// colons inside single-quoted literals.
fn segments(sql: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut text_start = 0;
    let mut in_literal = false;
    let mut chars = sql.char_indices().peekable();

    while let Some((index, ch)) = chars.next() {
        if ch == '\'' {
            in_literal = !in_literal;
            continue;
        }
        if in_literal || ch != ':' {
            continue;
        }
        if !chars.peek().is_some_and(|(_, next)| is_name_start(*next)) {
            continue;
        }

        let name_start = index + 1;
        let mut name_end = sql.len();
        while let Some((next_index, next)) = chars.peek().copied() {
            if !is_name_char(next) {
                name_end = next_index;
                break;
            }
            chars.next();
        }

        if text_start < index {
            segments.push(Segment::Text(&sql[text_start..index]));
        }
        segments.push(Segment::Placeholder(&sql[name_start..name_end]));
        text_start = name_end;
    }

    if text_start < sql.len() {
        segments.push(Segment::Text(&sql[text_start..]));
    }
    segments
}

/// Builds the filter predicates for a request, without ordering or limit.
pub fn compose_predicates(request: &VenueQueryRequest) -> PredicateSet {
    let mut set = PredicateSet::default();

    if let Some(region) = request.region_filter() {
        set.push(
            Column::Address,
            Operator::Like,
            "region_pattern",
            QueryValue::Text(format!("%{region}%")),
        );
    }

    let style_types = mapper::style_venue_types(request.style());
    set.push_venue_types(&mapper::season_adjusted(style_types, request.season()));

    if let Some(range) = mapper::parking_range(request.guest_count()) {
        set.push(Column::Parking, Operator::AtLeast, "parking_min", QueryValue::Int(range.min));
        if let Some(max) = range.max {
            set.push(Column::Parking, Operator::AtMost, "parking_max", QueryValue::Int(max));
        }
    }

    if request.budget() == Some(Budget::Low) {
        set.push(
            Column::VenueType,
            Operator::NotEqual,
            "excluded_type",
            QueryValue::Text(VenueType::Hotel.code().to_string()),
        );
    }

    set
}

/// The strict recommendation query for a request.
pub fn compose(request: &VenueQueryRequest) -> VenueQuery {
    let hotel_first = request.budget() == Some(Budget::High);
    VenueQuery::render(compose_predicates(request), hotel_first, request.limit())
}

/// Human-readable account of how each answer was mapped. Descriptive only;
/// nothing here is ever executed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QueryExplanation {
    pub region_mapping: String,
    pub style_mapping: String,
    pub guest_count_mapping: String,
    pub budget_mapping: String,
    pub season_mapping: String,
}

pub fn explain(request: &VenueQueryRequest) -> QueryExplanation {
    QueryExplanation {
        region_mapping: match request.region_filter() {
            Some(region) => format!("address LIKE '%{region}%'"),
            None => "전체 지역".to_string(),
        },
        style_mapping: format!("{} → venueType 매핑", request.style_preference),
        guest_count_mapping: format!("{} → parking 수 기준 추정", request.guest_count),
        budget_mapping: format!("{} 예산 → venueType 우선순위", request.budget),
        season_mapping: format!("{} → 야외/실내 필터", request.season),
    }
}
