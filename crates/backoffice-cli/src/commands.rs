use std::fs;
use std::time::Instant;

use backoffice_client::{Client, Transport};
use backoffice_collection::{
    Column, CollectionStore, DEFAULT_SEARCH_DELAY, ListConfig, LoadStatus, SearchDebounce,
    SelectionState, Sortable, TableSort, display_value, header_label, is_selected, render_rows,
    resolve, rows_selection_state, toggle_row,
};
use backoffice_form::{FieldEvent, FormState, StatusKind};
use backoffice_query::{
    FilterError, NoHistory, Operator, QueryParamStore, decode, with_pagination_defaults,
};
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::cli::{GetArgs, ListArgs, SubmitArgs};
use crate::error::CliError;

// ── List ─────────────────────────────────────────────────────────

pub fn list<T: Transport>(client: &Client<T>, args: &ListArgs) -> Result<(), CliError> {
    let config = ListConfig::from_json(&fs::read_to_string(&args.view)?)?;
    let columns = config.columns();

    let mut params = QueryParamStore::new(args.query.as_deref(), NoHistory);
    let mut translator = config.filter_translator()?;
    translator.load(&params)?;

    let mut initial = params.params().clone();
    with_pagination_defaults(&mut initial);
    let mut store = config.store(&initial);

    if !args.filters.is_empty() {
        for (name, raw) in &args.filters {
            let filter_type = translator
                .field(name)
                .map(|f| f.filter_type)
                .ok_or_else(|| FilterError::UnknownField(name.clone()))?;
            let (value, operator) = decode(name, raw, filter_type)?;
            translator.on_change(name, value)?;
            if operator != Operator::Equals {
                translator.set_operator(name, operator)?;
            }
        }
        translator.apply(&mut store, &mut params);
    }

    if let Some(term) = &args.search {
        let mut debounce = SearchDebounce::new(DEFAULT_SEARCH_DELAY);
        let now = Instant::now();
        debounce.input(term.as_str(), now);
        debounce.poll(now + DEFAULT_SEARCH_DELAY, &mut store, &mut params);
    }

    let sort_column = args
        .sort
        .as_deref()
        .map(|id| find_column(&columns, id))
        .transpose()?;
    let mut sort = match sort_column {
        Some(_) => TableSort::new(),
        None => TableSort::from_params(&store.state().search_params),
    };
    let clicks = if args.desc { 2 } else { 1 };

    // Backend sorts change the query; client sorts need the rows first.
    if let Some(column) = sort_column.filter(|c| c.sortable == Sortable::Backend) {
        click_header(&mut sort, column, &mut store, clicks);
    }
    fetch(client, &mut store)?;
    if let Some(column) = sort_column.filter(|c| c.sortable == Sortable::Client) {
        click_header(&mut sort, column, &mut store, clicks);
    }

    if let Some((id, value)) = &args.select {
        select_matching(&mut store, id, value);
    }

    print_table(&columns, &sort, &store);
    info!(query = %params.params(), "listed {}", store.state().url);
    Ok(())
}

fn find_column<'a>(columns: &'a [Column], id: &str) -> Result<&'a Column, CliError> {
    columns
        .iter()
        .find(|c| c.id == id)
        .ok_or_else(|| CliError::UnknownColumn(id.to_string()))
}

fn fetch<T: Transport>(client: &Client<T>, store: &mut CollectionStore) -> Result<(), CliError> {
    store.refresh(client);
    match store.state().status {
        LoadStatus::Error => Err(CliError::Fetch(
            store.state().error.clone().unwrap_or_default(),
        )),
        _ => Ok(()),
    }
}

fn click_header(sort: &mut TableSort, column: &Column, store: &mut CollectionStore, clicks: u8) {
    for _ in 0..clicks {
        sort.on_header_click(column, store);
    }
}

fn select_matching(store: &mut CollectionStore, id: &str, value: &str) {
    let matching: Vec<usize> = store
        .items()
        .iter()
        .enumerate()
        .filter(|(_, row)| resolve(row, id).map(display_value).as_deref() == Some(value))
        .map(|(index, _)| index)
        .collect();
    debug!(count = matching.len(), "selecting rows");
    for index in matching {
        toggle_row(store, index);
    }
}

fn print_table(columns: &[Column], sort: &TableSort, store: &CollectionStore) {
    let header: Vec<String> = columns
        .iter()
        .filter(|c| c.visible)
        .map(|c| header_label(c, sort))
        .collect();
    println!("{}", header.join("\t"));

    let rows = render_rows(columns, store.state(), &Value::Null, None);
    let selection = rows_selection_state(store.items());
    for (row, item) in rows.iter().zip(store.items()) {
        if selection != SelectionState::None && !is_selected(item) {
            continue;
        }
        println!("{}", row.join("\t"));
    }
}

// ── Get ──────────────────────────────────────────────────────────

pub fn get<T: Transport>(client: &Client<T>, args: &GetArgs) -> Result<(), CliError> {
    let response = client.get(&args.path)?;
    println!("{}", serde_json::to_string_pretty(&response.body)?);
    Ok(())
}

// ── Submit ───────────────────────────────────────────────────────

pub fn submit<T: Transport>(client: &Client<T>, args: &SubmitArgs) -> Result<(), CliError> {
    let initial = match &args.data {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => json!({}),
    };
    let mut form = FormState::new(initial);

    for (name, value) in &args.set {
        form.on_change(FieldEvent::text(name.as_str(), value.as_str()))?;
    }
    for (name, value) in &args.set_number {
        form.on_change(FieldEvent::number(name.as_str(), value.as_str(), true))?;
    }
    for (name, raw) in &args.set_date {
        let (date, time) = raw.split_once(' ').unwrap_or((raw.as_str(), ""));
        form.on_change(FieldEvent::Date {
            name: name.clone(),
            date: date.to_string(),
            time: time.to_string(),
        })?;
    }

    let now = Instant::now();
    let result = form.submit(client, args.method.into(), &args.path, None, now);
    if let Some(message) = form.status_message(now) {
        let prefix = match message.kind {
            StatusKind::Success => "ok",
            StatusKind::Error => "failed",
        };
        eprintln!("{prefix}: {}", message.text);
    }
    for (field, error) in form.errors() {
        eprintln!("  {field}: {error}");
    }

    let response = result?;
    println!("{}", serde_json::to_string_pretty(&response.body)?);
    Ok(())
}
