//! Dependency-aware ordering.
//!
//! Merges the comparator ranking with "must precede" constraints taken
//! from project dependencies.
//!
//! # Algorithm
//! 1. Rank all projects by the chain with the `dependency` key masked out
//!    (dependencies become graph edges instead), giving each project a
//!    primary rank.
//! 2. Build a graph over non-terminal projects with an edge Q → P whenever
//!    P lists Q as a dependency. Unknown names are ignored.
//! 3. Reject cycles, naming the participants.
//! 4. Kahn's algorithm. Among ready nodes, pick the one with the best
//!    inherited rank: the best primary rank of the node and everything that
//!    transitively depends on it, then its own rank. A low-priority
//!    prerequisite of a high-priority project is pulled forward with it.
//! 5. Terminal projects keep their primary slots; active slots are filled
//!    in topological order.
//! 6. A final insertion pass with the full chain, moving a project left
//!    only past neighbours it has no edge with, so the topological order
//!    is preserved.
//!
//! # Reference
//! Kahn (1962), "Topological sorting of large networks"

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap, HashSet};

use tracing::{debug, warn};

use crate::context::PlanContext;
use crate::error::OrderError;
use crate::models::Project;
use crate::ranking::{ComparatorChain, SortKey};
use crate::ranking::chain::take_in_order;

/// "Must precede" graph over the non-terminal projects of a slice.
///
/// Nodes are indices into the slice the graph was built from.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    active: Vec<bool>,
    successors: Vec<Vec<usize>>,
    edges: HashSet<(usize, usize)>,
}

impl DependencyGraph {
    /// Builds the graph.
    ///
    /// Terminal projects get no edges, in either direction. A dependency
    /// name matches every active project with that name, case-insensitively.
    pub fn build(projects: &[Project]) -> Self {
        let active: Vec<bool> = projects.iter().map(|p| !p.is_terminal()).collect();

        let mut by_name: HashMap<String, Vec<usize>> = HashMap::new();
        for (i, p) in projects.iter().enumerate() {
            if active[i] {
                by_name.entry(p.name().to_lowercase()).or_default().push(i);
            }
        }

        let mut successors = vec![Vec::new(); projects.len()];
        let mut edges = HashSet::new();
        for (to, p) in projects.iter().enumerate() {
            if !active[to] {
                continue;
            }
            for dep in p.dependencies() {
                let Some(targets) = by_name.get(&dep.to_lowercase()) else {
                    debug!(project = p.name(), dependency = %dep, "ignoring unresolved dependency");
                    continue;
                };
                for &from in targets {
                    if edges.insert((from, to)) {
                        successors[from].push(to);
                    }
                }
            }
        }

        Self {
            active,
            successors,
            edges,
        }
    }

    /// A copy of the graph with self-dependencies removed.
    pub fn without_self_edges(&self) -> Self {
        let mut graph = self.clone();
        graph.edges.retain(|&(from, to)| from != to);
        for (node, next) in graph.successors.iter_mut().enumerate() {
            next.retain(|&n| n != node);
        }
        graph
    }

    /// Whether `from` must precede `to` directly.
    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        self.edges.contains(&(from, to))
    }

    /// Whether the two nodes are joined by an edge in either direction.
    pub fn linked(&self, a: usize, b: usize) -> bool {
        self.has_edge(a, b) || self.has_edge(b, a)
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Whether a node takes part in the graph (is not terminal).
    pub fn is_active(&self, node: usize) -> bool {
        self.active.get(node).copied().unwrap_or(false)
    }

    /// Direct successors of a node (projects that depend on it).
    pub fn successors(&self, node: usize) -> &[usize] {
        &self.successors[node]
    }

    /// Finds a cycle, visiting roots in `visit_order`.
    ///
    /// Returns the nodes on the cycle in edge order, or `None` if the graph
    /// is acyclic.
    pub fn find_cycle(&self, visit_order: &[usize]) -> Option<Vec<usize>> {
        let n = self.active.len();
        let mut visited = vec![false; n];
        let mut on_stack = vec![false; n];
        let mut path = Vec::new();

        for &root in visit_order {
            if self.is_active(root) && !visited[root] {
                if let Some(cycle) =
                    self.cycle_dfs(root, &mut visited, &mut on_stack, &mut path)
                {
                    return Some(cycle);
                }
            }
        }
        None
    }

    fn cycle_dfs(
        &self,
        node: usize,
        visited: &mut [bool],
        on_stack: &mut [bool],
        path: &mut Vec<usize>,
    ) -> Option<Vec<usize>> {
        visited[node] = true;
        on_stack[node] = true;
        path.push(node);

        for &next in &self.successors[node] {
            if on_stack[next] {
                // Back edge: the cycle is the path suffix starting at `next`.
                let start = path.iter().position(|&n| n == next).unwrap_or(0);
                return Some(path[start..].to_vec());
            }
            if !visited[next] {
                if let Some(cycle) = self.cycle_dfs(next, visited, on_stack, path) {
                    return Some(cycle);
                }
            }
        }

        path.pop();
        on_stack[node] = false;
        None
    }

    /// Topological order of the active nodes.
    ///
    /// `rank[i]` is the primary rank of node `i` (lower first). Ready nodes
    /// are taken by inherited rank, then own rank.
    ///
    /// # Errors
    /// Returns the cycle participants if the graph is not acyclic.
    pub fn topological_order(&self, rank: &[usize]) -> Result<Vec<usize>, Vec<usize>> {
        let mut by_rank: Vec<usize> = (0..self.active.len()).collect();
        by_rank.sort_by_key(|&i| rank[i]);
        if let Some(cycle) = self.find_cycle(&by_rank) {
            return Err(cycle);
        }

        let inherited = self.inherited_ranks(rank);
        let mut in_degree = vec![0usize; self.active.len()];
        for &(_, to) in &self.edges {
            in_degree[to] += 1;
        }

        let mut ready: BinaryHeap<Reverse<(usize, usize, usize)>> = (0..self.active.len())
            .filter(|&i| self.active[i] && in_degree[i] == 0)
            .map(|i| Reverse((inherited[i], rank[i], i)))
            .collect();

        let mut order = Vec::with_capacity(self.active.len());
        while let Some(Reverse((_, _, node))) = ready.pop() {
            order.push(node);
            for &next in &self.successors[node] {
                in_degree[next] -= 1;
                if in_degree[next] == 0 {
                    ready.push(Reverse((inherited[next], rank[next], next)));
                }
            }
        }
        Ok(order)
    }

    /// Best rank among each node and all of its transitive dependents.
    ///
    /// Requires an acyclic graph.
    fn inherited_ranks(&self, rank: &[usize]) -> Vec<usize> {
        let mut memo: Vec<Option<usize>> = vec![None; self.active.len()];
        for node in 0..self.active.len() {
            self.inherited_rank(node, rank, &mut memo);
        }
        memo.into_iter()
            .enumerate()
            .map(|(i, r)| r.unwrap_or(rank[i]))
            .collect()
    }

    fn inherited_rank(&self, node: usize, rank: &[usize], memo: &mut [Option<usize>]) -> usize {
        if let Some(r) = memo[node] {
            return r;
        }
        let mut best = rank[node];
        for &next in &self.successors[node] {
            best = best.min(self.inherited_rank(next, rank, memo));
        }
        memo[node] = Some(best);
        best
    }
}

/// Orders projects by the comparator chain built from `order`, honoring
/// dependencies between non-terminal projects.
///
/// # Errors
/// [`OrderError::DependencyCycle`] when active projects depend on each
/// other in a loop.
pub fn order_with_dependencies(
    projects: Vec<Project>,
    order: &[SortKey],
    ctx: &PlanContext,
) -> Result<Vec<Project>, OrderError> {
    DependencyOrderer::new(ComparatorChain::from_order(order)).order(projects, ctx)
}

/// Applies the two-phase dependency ordering with a given chain.
#[derive(Debug, Clone, Default)]
pub struct DependencyOrderer {
    chain: ComparatorChain,
}

impl DependencyOrderer {
    /// Creates an orderer for the chain.
    pub fn new(chain: ComparatorChain) -> Self {
        Self { chain }
    }

    /// The full chain used for the final pass.
    pub fn chain(&self) -> &ComparatorChain {
        &self.chain
    }

    /// Orders projects; see the module documentation for the phases.
    ///
    /// # Errors
    /// [`OrderError::DependencyCycle`] naming the projects on the cycle.
    pub fn order(&self, projects: Vec<Project>, ctx: &PlanContext) -> Result<Vec<Project>, OrderError> {
        let indices = self.order_indices(&projects, ctx)?;
        Ok(take_in_order(projects, &indices))
    }

    /// Same as [`order`](Self::order), returning indices into `projects`.
    pub fn order_indices(
        &self,
        projects: &[Project],
        ctx: &PlanContext,
    ) -> Result<Vec<usize>, OrderError> {
        let primary = self
            .chain
            .without(SortKey::Dependency.as_str())
            .sort_indices(projects, ctx);
        let mut rank = vec![0usize; projects.len()];
        for (pos, &i) in primary.iter().enumerate() {
            rank[i] = pos;
        }

        let graph = DependencyGraph::build(projects);
        debug!(
            count = projects.len(),
            edges = graph.edge_count(),
            keys = ?self.chain.key_names(),
            "ordering projects with dependencies"
        );

        let topo = graph.topological_order(&rank).map_err(|cycle| {
            let participants: Vec<String> =
                cycle.iter().map(|&i| projects[i].name().to_string()).collect();
            warn!(?participants, "dependency cycle");
            OrderError::DependencyCycle { participants }
        })?;

        // Terminal projects keep their primary slots.
        let mut topo_iter = topo.into_iter();
        let mut merged: Vec<usize> = primary
            .iter()
            .map(|&i| {
                if graph.is_active(i) {
                    topo_iter.next().unwrap_or(i)
                } else {
                    i
                }
            })
            .collect();

        self.settle(&mut merged, projects, &graph, ctx);
        Ok(merged)
    }

    /// Insertion pass with the full chain that never swaps linked neighbours.
    fn settle(
        &self,
        order: &mut [usize],
        projects: &[Project],
        graph: &DependencyGraph,
        ctx: &PlanContext,
    ) {
        for i in 1..order.len() {
            let mut j = i;
            while j > 0 {
                let (left, right) = (order[j - 1], order[j]);
                if graph.linked(left, right)
                    || self.chain.compare(&projects[right], &projects[left], ctx)
                        != Ordering::Less
                {
                    break;
                }
                order.swap(j - 1, j);
                j -= 1;
            }
        }
    }
}
