//! CLI command implementations

use anyhow::Context;
use codeweb_core::{EdgeKind, GraphSession, GraphStore, NodeKind, remove_graph};
use codeweb_indexer::{ImportConfig, ImportReport, Importer, LinkReport};
use std::path::PathBuf;

pub fn import(
    config: ImportConfig,
    path: PathBuf,
    project: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let mut session = GraphSession::open(&config.store_path)?;
    let project = project.or_else(|| config.project.clone());

    // The session is committed whether or not the batch succeeded.
    let result = run_import(&mut session, config, &path, project.as_deref());
    session.commit()?;
    let report = result?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "Imported {} files, {} skipped, {} write failures, {} CALLS edges",
            report.imported,
            report.skipped.len(),
            report.write_failures.len() + report.link.failures.len(),
            report.link.linked
        );
        for skipped in &report.skipped {
            println!("  skipped {}: {}", skipped.path.display(), skipped.reason);
        }
    }
    Ok(())
}

fn run_import(
    session: &mut GraphSession,
    config: ImportConfig,
    path: &std::path::Path,
    project: Option<&str>,
) -> anyhow::Result<ImportReport> {
    let mut importer = Importer::new(session.graph_mut(), config);
    if let Some(name) = project {
        importer.set_project(name)?;
    }

    if path.is_dir() {
        return importer.import_directory(path);
    }

    tracing::info!("Importing file: {}", path.display());
    importer.import_file(path)?;
    // A lone file has nothing to link against; leave existing CALLS alone.
    Ok(ImportReport {
        imported: 1,
        skipped: Vec::new(),
        write_failures: importer.failures().to_vec(),
        link: LinkReport::default(),
    })
}

pub fn projects(config: &ImportConfig) -> anyhow::Result<()> {
    let session = GraphSession::open(&config.store_path)?;
    let names = session.graph().list_projects()?;
    session.close();

    for name in names {
        println!("{}", name);
    }
    Ok(())
}

pub fn code(config: &ImportConfig, project: &str) -> anyhow::Result<()> {
    let session = GraphSession::open(&config.store_path)?;
    let code = session.graph().project_code(project)?;
    session.close();

    let code = code.with_context(|| format!("No code for project '{}'", project))?;
    println!("{}", code);
    Ok(())
}

pub fn delete(config: &ImportConfig, project: &str) -> anyhow::Result<()> {
    let mut session = GraphSession::open(&config.store_path)?;
    let result = session.graph_mut().delete_project(project);
    session.commit()?;
    result?;

    tracing::info!("Deleted project {}", project);
    Ok(())
}

pub fn clear(config: &ImportConfig) -> anyhow::Result<()> {
    tracing::info!("Clearing graph at: {}", config.store_path.display());

    remove_graph(&config.store_path)?;

    tracing::info!("Graph cleared");
    Ok(())
}

pub fn stats(config: &ImportConfig) -> anyhow::Result<()> {
    let session = GraphSession::open(&config.store_path)?;
    let graph = session.graph();

    println!("{} nodes, {} edges", graph.node_count(), graph.edge_count());
    for kind in [
        NodeKind::Project,
        NodeKind::File,
        NodeKind::Function,
        NodeKind::Package,
    ] {
        println!("  {:<18} {}", format!("{:?}", kind), graph.nodes_of_kind(kind).count());
    }
    for kind in [
        EdgeKind::ContainsFile,
        EdgeKind::ContainsFunction,
        EdgeKind::UsesPackage,
        EdgeKind::Calls,
    ] {
        println!("  {:<18} {}", format!("{:?}", kind), graph.edges_of_kind(kind).len());
    }

    session.close();
    Ok(())
}
