//! Inspect an exported castle file from the command line.
//!
//! Run with: cargo run -p castle_cli -- exports/castle.obj --library materials.json

use std::env;
use std::fs;

use anyhow::{bail, Context, Result};
use castle_core::{import_file, MaterialResolver, SceneNode};

fn main() -> Result<()> {
    env_logger::init();

    let mut input: Option<String> = None;
    let mut libraries: Vec<String> = Vec::new();
    let mut json = false;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--library" => {
                let path = args.next().context("--library needs a file path")?;
                libraries.push(path);
            }
            "--json" => json = true,
            _ if input.is_none() => input = Some(arg),
            _ => bail!("unexpected argument: {}", arg),
        }
    }

    let Some(input) = input else {
        print_usage();
        return Ok(());
    };

    // Fresh resolver per run; libraries register in the order given and the
    // first registration of a name wins.
    let mut materials: MaterialResolver<String> = MaterialResolver::new();

    for library in &libraries {
        let content = fs::read_to_string(library)
            .with_context(|| format!("reading material library {}", library))?;
        let names: Vec<String> = serde_json::from_str(&content)
            .with_context(|| format!("material library {} is not a JSON list of names", library))?;

        for name in names {
            if !materials.register(name.clone(), name.clone()) {
                log::debug!("material `{}` already registered, keeping the first", name);
            }
        }
    }

    let import =
        import_file(&input, &materials).with_context(|| format!("importing {}", input))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&import.root)?);
    } else {
        print_node(&import.root, 0);
        println!();
        println!(
            "{} nodes, {} meshes, {} triangles",
            import.root.node_count(),
            import.root.mesh_count(),
            import.root.total_triangle_count()
        );
    }

    if !import.diagnostics.is_empty() {
        eprintln!();
        eprintln!("{} diagnostics:", import.diagnostics.len());
        for diagnostic in &import.diagnostics {
            eprintln!("  {}", diagnostic);
        }
    }

    Ok(())
}

fn print_node(node: &SceneNode<String>, depth: usize) {
    let indent = "  ".repeat(depth);
    let name = if node.name.is_empty() {
        "(placeholder)"
    } else {
        node.name.as_str()
    };

    match &node.mesh {
        Some(mesh) => {
            let material = node.material.as_deref().unwrap_or("-");
            println!(
                "{}{} [{} vertices, {} triangles, material: {}, collider: {}]",
                indent,
                name,
                mesh.vertex_count(),
                mesh.triangle_count(),
                material,
                node.has_collider
            );
        }
        None => println!("{}{}", indent, name),
    }

    for child in &node.children {
        print_node(child, depth + 1);
    }
}

fn print_usage() {
    println!("Usage: castle_cli <file.obj> [--library materials.json]... [--json]");
    println!();
    println!("A material library file is a JSON list of material names; each name");
    println!("registers as its own handle. Libraries register in the order given;");
    println!("the first registration of a name wins.");
}
