use botnen_core::{CoreError, EntryForm};

use super::{emit, Context};

type CmdResult = Result<(), Box<dyn std::error::Error>>;

pub fn add(ctx: &Context, name: &str, date: &str, json: bool) -> CmdResult {
    let mut store = ctx.open_store()?;
    let mut form = EntryForm::with_input(name, date);
    let event = form.submit(&mut store)?;
    emit(&event, json)
}

pub fn edit(
    ctx: &Context,
    index: usize,
    name: Option<String>,
    date: Option<String>,
    json: bool,
) -> CmdResult {
    let mut store = ctx.open_store()?;
    let mut form = EntryForm::new();
    if !form.begin_edit(&store, Some(index)) {
        return Err(CoreError::IndexOutOfRange {
            index,
            len: store.len(),
        }
        .into());
    }
    if let Some(name) = name {
        form.name = name;
    }
    if let Some(date) = date {
        form.date = date;
    }
    let event = form.submit(&mut store)?;
    emit(&event, json)
}

pub fn delete(ctx: &Context, index: usize, json: bool) -> CmdResult {
    let mut store = ctx.open_store()?;
    let mut form = EntryForm::new();
    if let Some(event) = form.delete_selected(&mut store, Some(index))? {
        emit(&event, json)?;
    }
    Ok(())
}

pub fn list(ctx: &Context, json: bool) -> CmdResult {
    let store = ctx.open_store()?;
    if json {
        println!("{}", serde_json::to_string_pretty(store.list())?);
        return Ok(());
    }
    if store.is_empty() {
        println!("no countdowns");
    }
    for (index, countdown) in store.list().iter().enumerate() {
        println!("[{index}] {countdown}");
    }
    Ok(())
}
