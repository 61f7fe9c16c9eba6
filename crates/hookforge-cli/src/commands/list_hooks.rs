//! List hooks command implementation.

use hookforge_hooks::registry;

/// Runs the list-hooks command. With a technology name, lists its hooks;
/// without one, lists every technology that has hooks.
pub fn run(technology: Option<&str>) {
    match technology {
        Some(tech) => list_for(tech),
        None => list_all(),
    }
}

fn list_for(tech: &str) {
    let ids = registry::hook_ids_for(tech);
    if ids.is_empty() {
        println!("No specific hooks available for {tech}");
        return;
    }

    println!("Hooks for {tech}:\n");
    println!("{:<28} Description", "Hook");
    println!("{}", "-".repeat(72));
    for id in ids {
        println!(
            "{:<28} {}",
            id,
            registry::hook_description(id).unwrap_or("")
        );
    }
}

fn list_all() {
    println!("Technologies with hooks:\n");
    for (tech, repos) in registry::TECH_HOOKS {
        let ids = registry::hook_ids_for(tech);
        println!(
            "{:<12} {} hook(s) from {} repo(s): {}",
            tech,
            ids.len(),
            repos.len(),
            ids.join(", ")
        );
    }

    println!("\nBaseline hooks are always included. Use:");
    println!("  hookforge list-hooks <technology>");
}
