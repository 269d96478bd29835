use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sea_orm::sea_query::SimpleExpr;
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, JoinType, QueryFilter, QuerySelect, QueryTrait,
    RelationDef, Related, Value,
};
use tracing::debug;
use uuid::Uuid;

use crate::domain::common::entities::app_errors::CoreError;
use crate::domain::filter::value_objects::{
    FilterOperator, FilterTerm, FilterValue, Operand, parse_filter_expression,
};
use crate::infrastructure::repositories::registry::Filterable;

/// Turns an external enum spelling into the primitive stored in the column.
pub type EnumNormalizer = fn(&FilterValue) -> Option<Value>;

#[derive(Clone, Copy)]
pub enum FieldKind {
    Text,
    Uuid,
    Timestamp,
    Enum(EnumNormalizer),
}

impl fmt::Debug for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Text => f.write_str("Text"),
            FieldKind::Uuid => f.write_str("Uuid"),
            FieldKind::Timestamp => f.write_str("Timestamp"),
            FieldKind::Enum(_) => f.write_str("Enum"),
        }
    }
}

enum Comparison {
    Eq(Value),
    Ne(Value),
    Gt(Value),
    Gte(Value),
    Lt(Value),
    Lte(Value),
    Like(String),
    In(Vec<Value>),
    Between(Value, Value),
    IsNull,
    IsNotNull,
}

type Comparator = Arc<dyn Fn(Comparison) -> SimpleExpr + Send + Sync>;

/// A filterable column together with the type its operands are bound to.
#[derive(Clone)]
pub struct Field {
    name: &'static str,
    kind: FieldKind,
    compare: Comparator,
}

impl Field {
    fn new<C>(name: &'static str, column: C, kind: FieldKind) -> Self
    where
        C: ColumnTrait + Send + Sync + 'static,
    {
        let compare = move |comparison: Comparison| match comparison {
            Comparison::Eq(v) => column.eq(v),
            Comparison::Ne(v) => column.ne(v),
            Comparison::Gt(v) => column.gt(v),
            Comparison::Gte(v) => column.gte(v),
            Comparison::Lt(v) => column.lt(v),
            Comparison::Lte(v) => column.lte(v),
            Comparison::Like(pattern) => column.like(pattern),
            Comparison::In(values) => column.is_in(values),
            Comparison::Between(low, high) => column.between(low, high),
            Comparison::IsNull => column.is_null(),
            Comparison::IsNotNull => column.is_not_null(),
        };

        Self {
            name,
            kind,
            compare: Arc::new(compare),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    fn bind(&self, operator: FilterOperator, operand: &Operand) -> Result<SimpleExpr, CoreError> {
        let comparison = match (operator, operand) {
            (FilterOperator::Between, Operand::Range { low, high }) => {
                Comparison::Between(self.coerce(low)?, self.coerce(high)?)
            }
            (FilterOperator::In, Operand::Value(FilterValue::List(items))) => Comparison::In(
                items
                    .iter()
                    .map(|item| self.coerce(item))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            (FilterOperator::Like, Operand::Value(FilterValue::Text(pattern))) => {
                Comparison::Like(pattern.clone())
            }
            (FilterOperator::Eq, Operand::Value(FilterValue::Null)) => Comparison::IsNull,
            (FilterOperator::Ne, Operand::Value(FilterValue::Null)) => Comparison::IsNotNull,
            (op, Operand::Value(value)) if op.is_comparison() => {
                let value = self.coerce(value)?;
                match op {
                    FilterOperator::Eq => Comparison::Eq(value),
                    FilterOperator::Ne => Comparison::Ne(value),
                    FilterOperator::Gt => Comparison::Gt(value),
                    FilterOperator::Gte => Comparison::Gte(value),
                    FilterOperator::Lt => Comparison::Lt(value),
                    _ => Comparison::Lte(value),
                }
            }
            _ => {
                return Err(CoreError::InvalidFilter(format!(
                    "operator `{operator}` cannot be applied to `{}`",
                    self.name
                )));
            }
        };

        Ok((self.compare)(comparison))
    }

    fn coerce(&self, value: &FilterValue) -> Result<Value, CoreError> {
        let bound = match (self.kind, value) {
            (_, FilterValue::Null) => None,
            (FieldKind::Text, value) => value.render().map(Value::from),
            (FieldKind::Uuid, FilterValue::Text(s)) => Uuid::parse_str(s).ok().map(Value::from),
            (FieldKind::Timestamp, FilterValue::Date(date)) => Some(Value::from(start_of_day(*date))),
            (FieldKind::Timestamp, FilterValue::Text(s)) => Some(timestamp_value(s)),
            (FieldKind::Enum(normalize), value) => normalize(value),
            _ => None,
        };

        bound.ok_or_else(|| {
            CoreError::InvalidFilter(format!(
                "value {value:?} cannot be applied to `{}`",
                self.name
            ))
        })
    }
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// RFC 3339 and plain dates are bound as timestamps, anything else is
/// compared as text.
fn timestamp_value(raw: &str) -> Value {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Value::from(parsed.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Value::from(start_of_day(date));
    }
    Value::from(raw.to_string())
}

/// One declared relationship hop, joined when a predicate reaches through it.
#[derive(Clone, Copy)]
pub struct Join {
    name: &'static str,
    target: TypeId,
    def: fn() -> RelationDef,
}

impl Join {
    pub fn to<E, R>(name: &'static str) -> Self
    where
        E: Related<R>,
        R: EntityTrait + 'static,
    {
        Self {
            name,
            target: TypeId::of::<R>(),
            def: <E as Related<R>>::to,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Debug for Join {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Join").field("name", &self.name).finish()
    }
}

struct RelationFields {
    join: Join,
    fields: HashMap<&'static str, Field>,
}

/// Builder for the attributes reachable through one relation.
pub struct RelationFieldsBuilder<R: EntityTrait> {
    fields: HashMap<&'static str, Field>,
    _entity: PhantomData<fn() -> R>,
}

impl<R: EntityTrait> RelationFieldsBuilder<R>
where
    R::Column: Send + Sync + 'static,
{
    pub fn field(mut self, name: &'static str, column: R::Column, kind: FieldKind) -> Self {
        self.fields.insert(name, Field::new(name, column, kind));
        self
    }
}

/// Attribute registry of an entity: `name -> column` plus a one-level
/// `relation -> (join, name -> column)` table.
pub struct FieldMap<E: EntityTrait> {
    fields: HashMap<&'static str, Field>,
    relations: HashMap<&'static str, RelationFields>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: EntityTrait> Default for FieldMap<E> {
    fn default() -> Self {
        Self {
            fields: HashMap::new(),
            relations: HashMap::new(),
            _entity: PhantomData,
        }
    }
}

impl<E: EntityTrait> FieldMap<E>
where
    E::Column: Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: &'static str, column: E::Column, kind: FieldKind) -> Self {
        self.fields.insert(name, Field::new(name, column, kind));
        self
    }

    pub fn relation<R>(
        mut self,
        name: &'static str,
        build: impl FnOnce(RelationFieldsBuilder<R>) -> RelationFieldsBuilder<R>,
    ) -> Self
    where
        E: Related<R>,
        R: EntityTrait + 'static,
        R::Column: Send + Sync + 'static,
    {
        let builder = build(RelationFieldsBuilder {
            fields: HashMap::new(),
            _entity: PhantomData,
        });
        self.relations.insert(
            name,
            RelationFields {
                join: Join::to::<E, R>(name),
                fields: builder.fields,
            },
        );
        self
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// The registered hop to `R`, if any.
    pub fn join_to<R: EntityTrait + 'static>(&self) -> Option<Join> {
        self.relations
            .values()
            .map(|relation| relation.join)
            .find(|join| join.target == TypeId::of::<R>())
    }

    fn resolve(&self, path: &str) -> Option<(&Field, Option<Join>)> {
        match path.split_once('.') {
            None => self.fields.get(path).map(|field| (field, None)),
            Some((relation, attribute)) => {
                let relation = self.relations.get(relation)?;
                relation
                    .fields
                    .get(attribute)
                    .map(|field| (field, Some(relation.join)))
            }
        }
    }

    /// Binds parsed terms to columns. Unknown attribute paths are skipped.
    pub fn bind(&self, terms: Vec<FilterTerm>) -> Result<FilterSet<E>, CoreError> {
        let mut predicates = Vec::with_capacity(terms.len());

        for term in terms {
            let Some((field, join)) = self.resolve(&term.path) else {
                debug!(path = %term.path, "Skipping unknown filter attribute");
                continue;
            };

            let expr = field.bind(term.operator, &term.operand)?;
            predicates.push(Predicate {
                path: term.path,
                operator: term.operator,
                operand: term.operand,
                join,
                expr,
            });
        }

        Ok(FilterSet {
            predicates,
            _entity: PhantomData,
        })
    }
}

/// Compiles a JSON filter expression against the attribute registry of `E`.
pub fn compile<E: Filterable>(expression: &str) -> Result<FilterSet<E>, CoreError> {
    let fields = E::field_map();
    let terms = parse_filter_expression(expression, |path| fields.resolve(path).is_some())?;
    fields.bind(terms)
}

#[derive(Clone)]
pub struct Predicate {
    pub path: String,
    pub operator: FilterOperator,
    pub operand: Operand,
    join: Option<Join>,
    expr: SimpleExpr,
}

impl Predicate {
    pub fn join(&self) -> Option<Join> {
        self.join
    }
}

impl fmt::Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate")
            .field("path", &self.path)
            .field("operator", &self.operator)
            .field("operand", &self.operand)
            .finish()
    }
}

/// Compiled predicates for entity `E`, combined with AND.
pub struct FilterSet<E> {
    predicates: Vec<Predicate>,
    _entity: PhantomData<fn() -> E>,
}

impl<E> Clone for FilterSet<E> {
    fn clone(&self) -> Self {
        Self {
            predicates: self.predicates.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E> fmt::Debug for FilterSet<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.predicates.iter()).finish()
    }
}

impl<E> Default for FilterSet<E> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<E> FilterSet<E> {
    pub fn empty() -> Self {
        Self {
            predicates: Vec::new(),
            _entity: PhantomData,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }
}

impl<E: Filterable> FilterSet<E> {
    /// WHERE clause for `E`. Predicates on related entities, and the extra
    /// `join` if any, become an `id IN (SELECT ... JOIN ...)` semi-join so a
    /// parent never repeats when several children match.
    pub fn condition(&self, join: Option<Join>) -> Condition {
        let mut condition = Condition::all();
        let mut related = Condition::all();
        let mut joins: Vec<Join> = join.into_iter().collect();

        for predicate in &self.predicates {
            match predicate.join {
                None => condition = condition.add(predicate.expr.clone()),
                Some(join) => {
                    if !joins.iter().any(|j| j.target == join.target) {
                        joins.push(join);
                    }
                    related = related.add(predicate.expr.clone());
                }
            }
        }

        if joins.is_empty() {
            return condition;
        }

        let mut ids = E::find().select_only().column(E::id_column());
        for join in joins {
            ids = ids.join(JoinType::InnerJoin, (join.def)());
        }
        let ids = ids.filter(related).into_query();

        condition.add(E::id_column().in_subquery(ids))
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DbBackend, QueryFilter};

    use super::*;
    use crate::entity::{task_list, tasks};

    fn sql<E: Filterable>(filter: &FilterSet<E>) -> String {
        E::find()
            .filter(filter.condition(None))
            .build(DbBackend::Postgres)
            .to_string()
    }

    #[test]
    fn test_empty_expression_matches_everything() {
        let filter = compile::<tasks::Entity>("").unwrap();

        assert!(filter.is_empty());
        assert_eq!(filter.len(), 0);
    }

    #[test]
    fn test_unknown_attribute_is_dropped() {
        let filter = compile::<tasks::Entity>(r#"[["nonexistent_attr","=","x"]]"#).unwrap();
        assert!(filter.is_empty());

        let filter =
            compile::<tasks::Entity>(r#"[["task_list.nonexistent","=","x"],["nope.name","=","x"]]"#)
                .unwrap();
        assert!(filter.is_empty());
    }

    #[test]
    fn test_unknown_attribute_with_bad_operator_is_dropped() {
        let filter = compile::<tasks::Entity>(r#"[["nonexistent","~","x"]]"#).unwrap();
        assert!(filter.is_empty());

        let err = compile::<tasks::Entity>(r#"[["status","~","x"]]"#).unwrap_err();
        assert!(matches!(err, CoreError::InvalidFilter(_)));
    }

    #[test]
    fn test_password_hash_is_not_filterable() {
        let filter =
            compile::<crate::entity::users::Entity>(r#"[["password_hash","like","%"]]"#).unwrap();
        assert!(filter.is_empty());
    }

    #[test]
    fn test_predicates_keep_order() {
        let filter = compile::<tasks::Entity>(
            r#"[["status","=","active"],["title","like","Write%"],["priority","<=",2]]"#,
        )
        .unwrap();

        let paths: Vec<&str> = filter.predicates().iter().map(|p| p.path.as_str()).collect();
        assert_eq!(paths, vec!["status", "title", "priority"]);
    }

    #[test]
    fn test_comparison_sql() {
        let filter = compile::<tasks::Entity>(
            r#"[["status","=","active"],["priority",">=","HIGH"],["title","like","Write%"]]"#,
        )
        .unwrap();
        let sql = sql(&filter);

        assert!(sql.contains(r#""tasks"."status" = 'active'"#), "{sql}");
        assert!(sql.contains(r#""tasks"."priority" >= 2"#), "{sql}");
        assert!(sql.contains(r#""tasks"."title" LIKE 'Write%'"#), "{sql}");
    }

    #[test]
    fn test_date_string_binds_as_timestamp() {
        let filter = compile::<tasks::Entity>(r#"[["created_at",">","2024-01-01"]]"#).unwrap();

        assert_eq!(
            filter.predicates()[0].operand,
            Operand::Value(FilterValue::Date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()))
        );
        assert!(sql(&filter).contains("2024-01-01 00:00:00"));
    }

    #[test]
    fn test_in_and_between_sql() {
        let filter = compile::<tasks::Entity>(
            r#"[["status","in",["new","ACTIVE"]],["priority","between",[1,3]]]"#,
        )
        .unwrap();
        let sql = sql(&filter);

        assert!(sql.contains(r#""tasks"."status" IN ('new', 'active')"#), "{sql}");
        assert!(sql.contains(r#""tasks"."priority" BETWEEN 1 AND 3"#), "{sql}");
    }

    #[test]
    fn test_null_operand() {
        let filter =
            compile::<tasks::Entity>(r#"[["user","=",null],["task_list_id","!=",null]]"#).unwrap();
        let sql = sql(&filter);

        assert!(sql.contains(r#""tasks"."user" IS NULL"#), "{sql}");
        assert!(sql.contains(r#""tasks"."task_list_id" IS NOT NULL"#), "{sql}");
    }

    #[test]
    fn test_unbindable_values_are_invalid() {
        let err = compile::<tasks::Entity>(r#"[["id","=","not-a-uuid"]]"#).unwrap_err();
        assert!(matches!(err, CoreError::InvalidFilter(_)));

        let err = compile::<tasks::Entity>(r#"[["status","=","sleeping"]]"#).unwrap_err();
        assert!(matches!(err, CoreError::InvalidFilter(_)));

        let err = compile::<tasks::Entity>(r#"[["title",">",null]]"#).unwrap_err();
        assert!(matches!(err, CoreError::InvalidFilter(_)));
    }

    #[test]
    fn test_relation_predicate_becomes_semi_join() {
        let filter = compile::<tasks::Entity>(r#"[["task_list.name","=","Inbox"]]"#).unwrap();

        assert_eq!(filter.len(), 1);
        assert_eq!(filter.predicates()[0].join().map(|j| j.name()), Some("task_list"));

        let sql = sql(&filter);
        assert!(sql.contains(r#""tasks"."id" IN (SELECT "tasks"."id" FROM "tasks""#), "{sql}");
        assert!(sql.contains(r#"INNER JOIN "task_list""#), "{sql}");
        assert!(sql.contains(r#""task_list"."name" = 'Inbox'"#), "{sql}");
    }

    #[test]
    fn test_has_many_relation() {
        let filter = compile::<task_list::Entity>(r#"[["tasks.status","=","blocked"]]"#).unwrap();
        let sql = sql(&filter);

        assert!(sql.contains(r#"INNER JOIN "tasks""#), "{sql}");
        assert!(sql.contains(r#""tasks"."status" = 'blocked'"#), "{sql}");
    }

    #[test]
    fn test_explicit_join_without_predicates() {
        let filter = FilterSet::<task_list::Entity>::empty();
        let join = task_list::Entity::field_map().join_to::<tasks::Entity>();
        let sql = task_list::Entity::find()
            .filter(filter.condition(join))
            .build(DbBackend::Postgres)
            .to_string();

        assert!(sql.contains(r#"INNER JOIN "tasks""#), "{sql}");
    }

    #[test]
    fn test_explicit_join_shared_with_relation_predicate() {
        let filter = compile::<task_list::Entity>(r#"[["tasks.status","=","blocked"]]"#).unwrap();
        let join = task_list::Entity::field_map().join_to::<tasks::Entity>();
        let sql = task_list::Entity::find()
            .filter(filter.condition(join))
            .build(DbBackend::Postgres)
            .to_string();

        assert_eq!(sql.matches(r#"INNER JOIN "tasks""#).count(), 1, "{sql}");
    }
}
