use crate::backend::http::DumpClient;
use crate::backend::session::BridgeSession;
use crate::cli::config::BridgeConfig;
use crate::inspector::inspector::Inspector;
use crate::report::console::{format_elements, format_forest, forest_json};
use crate::trace::logger::TraceSink;
use crate::tree::dump_builder::DumpTreeBuilder;
use crate::tree::node::TreeNode;
use crate::tree::query_builder::QueryTreeBuilder;

// ============================================================================
// dump subcommand
// ============================================================================

pub fn cmd_dump(
    host: &str,
    port: u16,
    format: &str,
    verbose: u8,
    sink: &dyn TraceSink,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = DumpClient::new(host, port)?;

    if verbose > 0 {
        eprintln!("Fetching view hierarchy from {}...", client.url());
    }

    let forest = DumpTreeBuilder::new(&client, sink).build()?;

    if verbose > 0 {
        eprintln!("Done fetching view hierarchy ({} roots)", forest.len());
    }

    print!("{}", render(&forest, format)?);
    Ok(())
}

// ============================================================================
// tree subcommand
// ============================================================================

pub fn cmd_tree(
    bridge: &BridgeConfig,
    selector: &str,
    root: Option<&str>,
    format: &str,
    verbose: u8,
    sink: &dyn TraceSink,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = BridgeSession::launch(&bridge.command, &bridge.args, sink)?;

    if verbose > 0 {
        eprintln!("Rebuilding hierarchy for '{}'...", selector);
    }

    let forest = match root {
        Some(root_selector) => {
            let mut inspector = Inspector::new(&mut session, sink);
            let matches = inspector.query(root_selector)?;
            let root_element = matches.first()?;
            vec![inspector.tree_from(root_element)?]
        }
        None => QueryTreeBuilder::new(&mut session, sink).build(selector, None)?,
    };
    session.quit()?;

    if verbose > 0 {
        let nodes: usize = forest.iter().map(TreeNode::size).sum();
        eprintln!("Placed {} elements under {} roots", nodes, forest.len());
    }

    print!("{}", render(&forest, format)?);
    Ok(())
}

// ============================================================================
// query subcommand
// ============================================================================

pub fn cmd_query(
    bridge: &BridgeConfig,
    selector: &str,
    property: Option<&str>,
    sink: &dyn TraceSink,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = BridgeSession::launch(&bridge.command, &bridge.args, sink)?;
    let mut inspector = Inspector::new(&mut session, sink);

    let elements = inspector.query(selector)?;
    match property {
        Some(name) => {
            let first = elements.first()?;
            match inspector.property(first, name)? {
                Some(value) => println!("{}", value),
                None => println!("null"),
            }
        }
        None => {
            if elements.is_empty() {
                eprintln!("No elements match: {}", selector);
            }
            print!("{}", format_elements(&elements));
        }
    }

    drop(inspector);
    session.quit()?;
    Ok(())
}

// ============================================================================
// Helpers
// ============================================================================

/// Render a forest as `text` (default) or `json`.
pub fn render(forest: &[TreeNode], format: &str) -> Result<String, Box<dyn std::error::Error>> {
    match format {
        "json" => Ok(forest_json(forest)? + "\n"),
        _ => Ok(format_forest(forest)),
    }
}
