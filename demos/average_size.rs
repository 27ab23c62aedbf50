use sparse_nodemap::{Interner, LogDiagnostics, NodeMap, Value};

// Insert a pattern, one word per level, ending in a template.
fn add_pattern(root: &mut NodeMap<Value>, pattern: &str, template: &str, interner: &mut Interner) {
    let mut node = root;
    for word in pattern.split_whitespace() {
        if !node.contains_key(word) {
            node.put_interned(word, Value::node(NodeMap::child()), interner);
        }
        node = match node.get_mut(word).and_then(Value::as_node_mut) {
            Some(child) => child,
            None => return,
        };
    }
    node.put_interned("<template>", Value::text_in(template, interner), interner);
}

fn main() {
    let mut interner = Interner::new();
    let mut root = NodeMap::root();

    add_pattern(&mut root, "hello", "Hi there!", &mut interner);
    add_pattern(&mut root, "hello bot", "Hello, human.", &mut interner);
    add_pattern(&mut root, "what is your name", "I am a node map.", &mut interner);
    add_pattern(&mut root, "what is the time", "Time to branch.", &mut interner);
    add_pattern(&mut root, "bye", "See you.", &mut interner);

    println!("root entries: {:?}", root.key_set());
    println!("average branching: {:.3}", root.average_size());

    let what = root
        .get("WHAT")
        .and_then(Value::as_node)
        .and_then(|n| n.get("is"))
        .and_then(Value::as_node);
    if let Some(what_is) = what {
        println!("after \"what is\": {:?}", what_is.key_set());
        println!("expanded: {}", what_is.is_expanded());
    }

    // Removing something that isn't there is logged, not fatal.
    root.remove_or_report(&Value::text("nowhere"), &LogDiagnostics);
    println!("root entries after failed removal: {}", root.len());
    println!("interned strings: {}", interner.len());
}
