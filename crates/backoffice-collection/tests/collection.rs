use std::sync::Mutex;

use backoffice_client::{Client, ClientConfig, ClientError, Transport};
use backoffice_collection::*;
use backoffice_query::*;
use http::{Request, Response, StatusCode};
use serde_json::{Value, json};

/// Serves canned pages keyed on the request's query string and records every uri.
struct FakeApi {
    pages: Vec<(&'static str, StatusCode, Value)>,
    requests: Mutex<Vec<String>>,
}

impl FakeApi {
    fn new(pages: Vec<(&'static str, StatusCode, Value)>) -> Self {
        Self {
            pages,
            requests: Mutex::new(Vec::new()),
        }
    }

    fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for FakeApi {
    fn send(&self, request: Request<Vec<u8>>) -> Result<Response<Vec<u8>>, ClientError> {
        let uri = request.uri().to_string();
        self.requests.lock().unwrap().push(uri.clone());
        let query = request.uri().query().unwrap_or("");
        let (status, body) = self
            .pages
            .iter()
            .find(|(q, _, _)| *q == query)
            .map(|(_, status, body)| (*status, body.clone()))
            .unwrap_or((StatusCode::NOT_FOUND, json!({ "error": "no page" })));
        Ok(Response::builder()
            .status(status)
            .body(serde_json::to_vec(&body).unwrap())
            .unwrap())
    }
}

const VIEW: &str = r#"{
    "id": "sellers",
    "title": "Sellers",
    "resource": "sellers",
    "columns": [
        { "name": "Name", "id": "name", "sortable": "backend" },
        { "name": "City", "id": "address.city" }
    ],
    "filters": [{ "name": "name", "type": "text", "operator": "contains" }]
}"#;

fn client(api: FakeApi) -> Client<FakeApi> {
    Client::with_transport(ClientConfig::new("http://admin.test"), api)
}

#[test]
fn filter_sort_and_reload_drive_fetches() {
    let api = FakeApi::new(vec![
        (
            "page=1&page_size=1",
            StatusCode::OK,
            json!({ "data": [{ "name": "Acme", "address": { "city": "Leeds" } }, { "name": "Globex" }] }),
        ),
        (
            "page=1&page_size=1&name=%7Eac",
            StatusCode::OK,
            json!({ "data": [{ "name": "Acme", "address": { "city": "Leeds" } }] }),
        ),
        (
            "page=1&page_size=1&name=%7Eac&sort_by=name",
            StatusCode::OK,
            json!({ "data": [{ "name": "Acme", "address": { "city": "Leeds" } }] }),
        ),
    ]);
    let client = client(api);

    let config = ListConfig::from_json(VIEW).unwrap();
    let columns = config.columns();
    let mut params = QueryParamStore::new(None, MemoryHistory::new());
    let mut translator = config.filter_translator().unwrap();
    translator.load(&params).unwrap();

    let mut initial = params.params().clone();
    with_pagination_defaults(&mut initial);
    let mut store = config.store(&initial);

    assert!(store.refresh(&client));
    assert!(!store.refresh(&client));
    assert_eq!(store.items().len(), 2);

    translator.on_change("name", "ac").unwrap();
    translator.apply(&mut store, &mut params);
    assert_eq!(params.history().search(), "?name=%7Eac");
    assert!(store.refresh(&client));
    assert_eq!(store.items().len(), 1);

    let mut sort = TableSort::from_params(&store.state().search_params);
    sort.on_header_click(&columns[0], &mut store);
    assert!(store.refresh(&client));
    assert!(store.state().loaded());

    let rows = render_rows(&columns, store.state(), &Value::Null, None);
    assert_eq!(rows, [vec!["Acme".to_string(), "Leeds".to_string()]]);

    store.update(CollectionPatch::reload());
    assert!(store.refresh(&client));

    let requests = client.transport().requests();
    assert_eq!(requests.len(), 4);
    assert_eq!(
        requests[0],
        "http://admin.test/api/v1/sellers?page=1&page_size=1"
    );
    assert_eq!(requests[2], requests[3]);
}

#[test]
fn failed_fetch_is_recorded_not_retried() {
    let api = FakeApi::new(vec![("", StatusCode::INTERNAL_SERVER_ERROR, json!({}))]);
    let client = client(api);
    let mut store = CollectionStore::new("transactions", None, None);

    assert!(store.refresh(&client));
    assert_eq!(store.state().status, LoadStatus::Error);
    assert!(
        store
            .state()
            .error
            .as_deref()
            .unwrap()
            .contains("status 500")
    );
    assert!(!store.refresh(&client));
    assert_eq!(client.transport().requests().len(), 1);
}

#[test]
fn unauthorized_fetch_logs_session_out() {
    let api = FakeApi::new(vec![("", StatusCode::UNAUTHORIZED, json!({}))]);
    let client = client(api);
    let mut store = CollectionStore::new("buyers", None, None);

    store.refresh(&client);
    assert!(client.session().is_logged_out());
    assert_eq!(
        store.state().error.as_deref(),
        Some("authentication expired")
    );
}

#[test]
fn superseded_fetch_cannot_overwrite_newer_state() {
    let api = FakeApi::new(vec![
        ("name=old", StatusCode::OK, json!({ "data": [{ "name": "old" }] })),
        ("name=new", StatusCode::OK, json!({ "data": [{ "name": "new" }] })),
    ]);
    let client = client(api);
    let mut store = CollectionStore::new("buyers", Some(QueryParams::parse("name=old")), None);

    let old = store.poll().unwrap();
    store.update(CollectionPatch::new().search_params(QueryParams::parse("name=new")));
    let new = store.poll().unwrap();

    let new_result = client.fetch(&new.url);
    let old_result = client.fetch(&old.url);
    assert!(store.complete(&new, new_result));
    assert!(!store.complete(&old, old_result));
    assert_eq!(store.items(), &[json!({ "name": "new" })]);
}
