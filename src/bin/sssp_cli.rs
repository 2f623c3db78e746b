//! Plain-text SSSP harness.
//!
//! Reads `n m source` followed by m edges `u v w` from standard input and
//! writes one line per vertex: its distance from the source, or `INF` when
//! unreachable. `--dijkstra` runs the baseline oracle instead of the BMSSP
//! engine; `--next-hops` appends each vertex's first hop (`-` when there is
//! none). Exits 0 on success, 2 on malformed input.

use std::io::Read;
use std::str::FromStr;

use bmssp::{Bmssp, Dijkstra, DirectedGraph, Error, ShortestPathAlgorithm};

fn main() {
    env_logger::init();

    let mut use_dijkstra = false;
    let mut emit_next_hops = false;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--dijkstra" => use_dijkstra = true,
            "--next-hops" => emit_next_hops = true,
            other => {
                eprintln!("sssp-cli: unknown argument '{other}'");
                eprintln!("usage: sssp-cli [--dijkstra] [--next-hops] < graph.txt");
                std::process::exit(2);
            }
        }
    }

    match run(use_dijkstra, emit_next_hops) {
        Ok(output) => print!("{output}"),
        Err(err) => {
            eprintln!("sssp-cli: {err}");
            std::process::exit(2);
        }
    }
}

fn run(use_dijkstra: bool, emit_next_hops: bool) -> bmssp::Result<String> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .map_err(|e| Error::MalformedInput(e.to_string()))?;
    let mut tokens = input.split_ascii_whitespace();

    let n: usize = next_token(&mut tokens, "vertex count")?;
    let m: usize = next_token(&mut tokens, "edge count")?;
    let source: usize = next_token(&mut tokens, "source")?;

    let mut graph: DirectedGraph<i64> = DirectedGraph::new(n);
    for _ in 0..m {
        let u: usize = next_token(&mut tokens, "edge tail")?;
        let v: usize = next_token(&mut tokens, "edge head")?;
        let w: i64 = next_token(&mut tokens, "edge weight")?;
        graph.add_edge(u, v, w)?;
    }
    if tokens.next().is_some() {
        return Err(Error::MalformedInput("trailing tokens after edge list".into()));
    }

    let result = if use_dijkstra {
        Dijkstra::new().compute_shortest_paths(&graph, source)?
    } else {
        Bmssp::new(n).compute_shortest_paths(&graph, source)?
    };

    let mut output = String::new();
    for v in 0..n {
        match result.distances[v] {
            Some(d) => output.push_str(&d.to_string()),
            None => output.push_str("INF"),
        }
        if emit_next_hops {
            match result.next_hop(v) {
                Some(hop) => output.push_str(&format!(" {hop}")),
                None => output.push_str(" -"),
            }
        }
        output.push('\n');
    }
    Ok(output)
}

fn next_token<T>(tokens: &mut std::str::SplitAsciiWhitespace<'_>, what: &str) -> bmssp::Result<T>
where
    T: FromStr,
{
    let token = tokens
        .next()
        .ok_or_else(|| Error::MalformedInput(format!("missing {what}")))?;
    token
        .parse()
        .map_err(|_| Error::MalformedInput(format!("bad {what}: '{token}'")))
}
