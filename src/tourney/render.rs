// Graph descriptions for the margin graph, the majority cycles and the Split Cycle defeats.

use crate::tourney::*;

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum GraphFormat {
    /// One `from,to[,weight]` line per edge.
    Text,
    /// Graphviz digraph.
    Dot,
}

impl GraphFormat {
    pub fn parse(s: &str) -> TourneyResult<GraphFormat> {
        match s {
            "text" => Ok(GraphFormat::Text),
            "dot" => Ok(GraphFormat::Dot),
            x => whatever!("Unknown graph format {:?}, expected text or dot", x),
        }
    }
}

// A directed graph over named nodes, weighted or not.
struct NamedGraph<'a> {
    name: String,
    nodes: Vec<&'a str>,
    edges: Vec<(&'a str, &'a str, Option<i64>)>,
}

impl<'a> NamedGraph<'a> {
    fn to_text(&self) -> String {
        let mut lines: Vec<String> = vec![format!("# {}", self.name), self.nodes.join(",")];
        for (from, to, weight) in self.edges.iter() {
            lines.push(match weight {
                Some(w) => format!("{},{},{}", from, to, w),
                None => format!("{},{}", from, to),
            });
        }
        lines.join("\n")
    }

    fn to_dot(&self) -> String {
        let mut lines: Vec<String> = vec![
            format!("// {}", self.name),
            "digraph {".to_string(),
            "  layout=\"circo\";".to_string(),
        ];
        for n in self.nodes.iter() {
            lines.push(format!("  {:?} [label={:?}];", n, n));
        }
        for (from, to, weight) in self.edges.iter() {
            lines.push(match weight {
                Some(w) => format!(
                    "  {:?} -> {:?} [label=\"{}\", weight=\"{}\"];",
                    from, to, w, w
                ),
                None => format!("  {:?} -> {:?};", from, to),
            });
        }
        lines.push("}".to_string());
        lines.join("\n")
    }

    fn render(&self, format: GraphFormat) -> String {
        match format {
            GraphFormat::Text => self.to_text(),
            GraphFormat::Dot => self.to_dot(),
        }
    }
}

fn margin_graph<'a>(profile: &Profile, names: &'a [String]) -> NamedGraph<'a> {
    NamedGraph {
        name: "margin graph".to_string(),
        nodes: names.iter().map(|s| s.as_str()).collect(),
        edges: profile
            .margin_graph()
            .edges()
            .iter()
            .map(|(x, y, m)| (names[*x].as_str(), names[*y].as_str(), Some(*m)))
            .collect(),
    }
}

fn cycle_graph<'a>(idx: usize, cycle: &Cycle, profile: &Profile, names: &'a [String]) -> NamedGraph<'a> {
    NamedGraph {
        name: format!("cycle {}", idx + 1),
        nodes: cycle.candidates().iter().map(|c| names[*c].as_str()).collect(),
        edges: cycle
            .edges()
            .map(|(x, y)| (names[x].as_str(), names[y].as_str(), Some(profile.margin(x, y))))
            .collect(),
    }
}

fn defeat_graph<'a>(defeats: &DefeatRelation, names: &'a [String]) -> NamedGraph<'a> {
    NamedGraph {
        name: "split cycle defeats".to_string(),
        nodes: names.iter().map(|s| s.as_str()).collect(),
        edges: defeats
            .edges()
            .iter()
            .map(|(x, y)| (names[*x].as_str(), names[*y].as_str(), None))
            .collect(),
    }
}

/// Renders the margin graph, then every majority cycle, then the Split Cycle defeats.
pub fn render_graphs(format: GraphFormat, election: &Election, split: &SplitCycleRun) -> String {
    let names = &election.names;
    let mut graphs: Vec<NamedGraph> = vec![margin_graph(&election.profile, names)];
    if let Some(cycles) = split.cycles() {
        for (idx, cycle) in cycles.iter().enumerate() {
            graphs.push(cycle_graph(idx, cycle, &election.profile, names));
        }
    }
    graphs.push(defeat_graph(&split.defeats, names));
    let rendered: Vec<String> = graphs.iter().map(|g| g.render(format)).collect();
    rendered.join("\n\n")
}
