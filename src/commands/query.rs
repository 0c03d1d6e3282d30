//! Search and select command implementations.
//!
//! Both commands build the tree and then query it the way an interactive
//! front end would: incremental search over full names, and check-box
//! selection resolved to the leaves the rest of an application consumes.

use super::models::{SearchArgs, SelectArgs};
use super::tree::load_tree;
use crate::aggregator::{Selection, TreeSearch};
use crate::output::render_listing;
use anyhow::Result;
use log::{info, warn};

/// Execute the search command
///
/// **Public** - prints every node whose full name contains the query and
/// returns the matching names
pub fn execute_search(args: SearchArgs) -> Result<Vec<String>> {
    if args.query.is_empty() {
        anyhow::bail!("Search query cannot be empty");
    }

    let tree = load_tree(&args.input)?;
    let hits = TreeSearch::new(&tree)
        .case_sensitive(args.case_sensitive)
        .find_all(&args.query);

    info!("{} nodes match '{}'", hits.len(), args.query);

    if !hits.is_empty() {
        println!("{}", render_listing(&tree, &hits));
    }

    Ok(hits
        .into_iter()
        .map(|id| tree.full_name(id).to_string())
        .collect())
}

/// Execute the select command
///
/// **Public** - selects the named loggers (everything when none are given),
/// deselects the excluded ones and prints the selected leaves
pub fn execute_select(args: SelectArgs) -> Result<Vec<String>> {
    let tree = load_tree(&args.input)?;

    let mut selection = if args.names.is_empty() {
        Selection::all(&tree)
    } else {
        Selection::new(&tree)
    };

    for name in &args.names {
        match tree.find(name) {
            Some(id) => selection.select(id),
            None => warn!("No logger named '{}'", name),
        }
    }

    for name in &args.exclude {
        match tree.find(name) {
            Some(id) => selection.deselect(id),
            None => warn!("No logger named '{}'", name),
        }
    }

    let leaves = selection.selected_leaves();
    info!(
        "Selected {} leaves ({} events under the selection, {} on the leaves)",
        leaves.len(),
        selection.selected_events(),
        selection.selected_leaf_frequency()
    );

    if !leaves.is_empty() {
        println!("{}", render_listing(&tree, &leaves));
    }

    Ok(leaves
        .into_iter()
        .map(|id| tree.full_name(id).to_string())
        .collect())
}
