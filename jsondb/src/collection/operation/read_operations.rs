use crate::collection::{DocumentMap, FindPlan};
use crate::errors::JsonDbResult;
use crate::filter::Query;

fn plan(query: &Query) -> JsonDbResult<FindPlan> {
    FindPlan::create(query).map_err(|err| {
        log::error!("Invalid query {}: {}", query, err);
        err
    })
}

/// Ids of every document matching `query`, in key order.
///
/// An invalid query is reported once, however deep the offending clause sits.
///
/// ```rust
/// use jsondb::collection::{select, DocumentMap};
/// use jsondb::doc;
/// use jsondb::filter::Query;
///
/// let mut documents = DocumentMap::new();
/// documents.insert("a".to_string(), doc! { _id: "a", n: 1 });
/// documents.insert("b".to_string(), doc! { _id: "b", n: 2 });
///
/// let ids = select(&documents, &Query::from(doc! { n: { "$gt": 1 } })).unwrap();
/// assert_eq!(ids, vec!["b".to_string()]);
/// ```
pub fn select(documents: &DocumentMap, query: &Query) -> JsonDbResult<Vec<String>> {
    let ids = match plan(query)? {
        FindPlan::All => documents.keys().cloned().collect(),
        FindPlan::ById(id) => {
            log::debug!("Resolving {} by key lookup", id);
            if documents.contains_key(&id) {
                vec![id]
            } else {
                Vec::new()
            }
        }
        FindPlan::Scan(filter) => documents
            .iter()
            .filter(|(_, document)| filter.apply(document))
            .map(|(id, _)| id.clone())
            .collect(),
    };
    Ok(ids)
}

/// Id of the first document matching `query`, in key order.
pub fn select_one(documents: &DocumentMap, query: &Query) -> JsonDbResult<Option<String>> {
    let id = match plan(query)? {
        FindPlan::All => documents.keys().next().cloned(),
        FindPlan::ById(id) => documents.contains_key(&id).then_some(id),
        FindPlan::Scan(filter) => documents
            .iter()
            .find(|(_, document)| filter.apply(document))
            .map(|(id, _)| id.clone()),
    };
    Ok(id)
}
