use {
    num::Zero,
    std::{
        cmp::Ordering,
        collections::{BinaryHeap, HashMap},
        hash::Hash,
        ops::Add,
    },
};

pub struct OpenSetElement<V, C>(pub V, pub C);

impl<V, C: Ord> PartialEq for OpenSetElement<V, C> {
    fn eq(&self, other: &Self) -> bool {
        self.1 == other.1
    }
}

impl<V, C: Ord> PartialOrd for OpenSetElement<V, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<V, C: Ord> Eq for OpenSetElement<V, C> {}

impl<V, C: Ord> Ord for OpenSetElement<V, C> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse the order so that cost is minimized when popping from the heap
        other.1.cmp(&self.1)
    }
}

pub struct DijkstraState<V, C> {
    open_set_heap: BinaryHeap<OpenSetElement<V, C>>,
    neighbors: Vec<OpenSetElement<V, C>>,
}

impl<V, C> DijkstraState<V, C> {
    fn clear(&mut self) {
        self.open_set_heap.clear();
        self.neighbors.clear();
    }
}

impl<V, C> Default for DijkstraState<V, C>
where
    OpenSetElement<V, C>: Ord,
{
    fn default() -> Self {
        Self {
            open_set_heap: Default::default(),
            neighbors: Default::default(),
        }
    }
}

/// An implementation of https://en.wikipedia.org/wiki/Dijkstra%27s_algorithm over an implicit
/// graph: vertices exist only as values produced by `neighbors`, never as a materialized graph.
///
/// The frontier lives in a min-heap of tentative costs. Entries are never rewritten in place;
/// a relaxation pushes a fresh element and stale ones are skipped when popped. Ties among
/// equal-cost frontier vertices break by heap order, which is acceptable nondeterminism.
///
/// `reset` must record a zero cost for the start vertex, such that `cost_from_start(start)`
/// returns `Some(zero)` afterwards.
///
/// If `is_end` never returns true (a search with no destination), `run` exhausts the reachable
/// frontier, returns `None`, and leaves the full single-source tree in whatever storage
/// `update_vertex` maintains. An unreachable destination produces the same `None` — a valid
/// result for the caller to branch on, not an error.
pub trait Dijkstra {
    type Vertex: Clone + Eq + Hash;
    type Cost: Add<Self::Cost, Output = Self::Cost> + Clone + Ord + Zero;

    fn start(&self) -> &Self::Vertex;
    fn is_end(&self, vertex: &Self::Vertex) -> bool;
    fn path_to(&self, vertex: &Self::Vertex) -> Vec<Self::Vertex>;
    fn cost_from_start(&self, vertex: &Self::Vertex) -> Option<Self::Cost>;

    /// The cost of each element is from `vertex` to the neighbor.
    fn neighbors(
        &mut self,
        vertex: &Self::Vertex,
        neighbors: &mut Vec<OpenSetElement<Self::Vertex, Self::Cost>>,
    );

    fn update_vertex(&mut self, from: &Self::Vertex, to: &Self::Vertex, cost: Self::Cost);
    fn reset(&mut self);

    fn run_internal(
        &mut self,
        state: &mut DijkstraState<Self::Vertex, Self::Cost>,
    ) -> Option<Vec<Self::Vertex>> {
        self.reset();
        state.clear();

        let start: Self::Vertex = self.start().clone();

        state
            .open_set_heap
            .push(OpenSetElement(start, Self::Cost::zero()));

        while let Some(OpenSetElement(current, cost)) = state.open_set_heap.pop() {
            if self
                .cost_from_start(&current)
                .map_or(false, |best: Self::Cost| best < cost)
            {
                // A stale entry: `current` was finalized at a lower cost after this was pushed.
                continue;
            }

            if self.is_end(&current) {
                return Some(self.path_to(&current));
            }

            self.neighbors(&current, &mut state.neighbors);

            for OpenSetElement(neighbor, step_cost) in state.neighbors.drain(..) {
                let neighbor_cost: Self::Cost = cost.clone() + step_cost;

                if self
                    .cost_from_start(&neighbor)
                    .map_or(true, |best: Self::Cost| neighbor_cost < best)
                {
                    self.update_vertex(&current, &neighbor, neighbor_cost.clone());
                    state
                        .open_set_heap
                        .push(OpenSetElement(neighbor, neighbor_cost));
                }
            }
        }

        None
    }

    fn run(&mut self) -> Option<Vec<Self::Vertex>> {
        self.run_internal(&mut DijkstraState::default())
    }
}

#[cfg_attr(test, derive(Debug))]
pub struct ShortestPathResult<V> {
    /// `None` iff the destination was omitted or unreachable.
    pub distance: Option<u32>,

    /// Walks from the start vertex to the destination, both included. `None` iff `distance` is.
    pub path: Option<Vec<V>>,

    /// The predecessor of every reached vertex other than the start.
    pub predecessors: HashMap<V, V>,
}

struct FnDijkstra<V, N> {
    start: V,
    end: Option<V>,
    neighbors_fn: N,
    costs: HashMap<V, u32>,
    predecessors: HashMap<V, V>,
}

impl<V: Clone + Eq + Hash, N: FnMut(&V, &mut Vec<OpenSetElement<V, u32>>)> Dijkstra
    for FnDijkstra<V, N>
{
    type Vertex = V;
    type Cost = u32;

    fn start(&self) -> &V {
        &self.start
    }

    fn is_end(&self, vertex: &V) -> bool {
        self.end.as_ref() == Some(vertex)
    }

    fn path_to(&self, vertex: &V) -> Vec<V> {
        let mut path: Vec<V> = vec![vertex.clone()];
        let mut current: &V = vertex;

        while let Some(predecessor) = self.predecessors.get(current) {
            path.push(predecessor.clone());
            current = predecessor;
        }

        path.reverse();

        path
    }

    fn cost_from_start(&self, vertex: &V) -> Option<u32> {
        self.costs.get(vertex).copied()
    }

    fn neighbors(&mut self, vertex: &V, neighbors: &mut Vec<OpenSetElement<V, u32>>) {
        neighbors.clear();
        (self.neighbors_fn)(vertex, neighbors);
    }

    fn update_vertex(&mut self, from: &V, to: &V, cost: u32) {
        self.costs.insert(to.clone(), cost);
        self.predecessors.insert(to.clone(), from.clone());
    }

    fn reset(&mut self) {
        self.costs.clear();
        self.predecessors.clear();
        self.costs.insert(self.start.clone(), 0_u32);
    }
}

/// Single-source shortest path with the neighbor function as the whole graph definition.
///
/// With a destination, the search finalizes it and stops, returning its distance and the
/// reconstructed path; with `None`, it sweeps everything reachable and only the predecessor tree
/// is of interest.
pub fn shortest_path<V, N>(start: V, end: Option<V>, neighbors: N) -> ShortestPathResult<V>
where
    V: Clone + Eq + Hash,
    N: FnMut(&V, &mut Vec<OpenSetElement<V, u32>>),
{
    let mut search: FnDijkstra<V, N> = FnDijkstra {
        start,
        end,
        neighbors_fn: neighbors,
        costs: HashMap::new(),
        predecessors: HashMap::new(),
    };

    let path: Option<Vec<V>> = search.run();
    let distance: Option<u32> = path
        .as_ref()
        .and_then(|path: &Vec<V>| path.last())
        .and_then(|end: &V| search.costs.get(end).copied());

    ShortestPathResult {
        distance,
        path,
        predecessors: search.predecessors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_graph_neighbors(vertex: &i32, neighbors: &mut Vec<OpenSetElement<i32, u32>>) {
        for neighbor in [*vertex - 1_i32, *vertex + 1_i32] {
            if (0_i32..5_i32).contains(&neighbor) {
                neighbors.push(OpenSetElement(neighbor, 1_u32));
            }
        }
    }

    #[test]
    fn test_line_graph() {
        let result: ShortestPathResult<i32> =
            shortest_path(0_i32, Some(4_i32), line_graph_neighbors);

        assert_eq!(result.distance, Some(4_u32));
        assert_eq!(result.path, Some(vec![0_i32, 1_i32, 2_i32, 3_i32, 4_i32]));
    }

    #[test]
    fn test_unreachable_destination() {
        // Vertex 9 is in a disconnected component.
        let result: ShortestPathResult<i32> =
            shortest_path(0_i32, Some(9_i32), line_graph_neighbors);

        assert_eq!(result.distance, None);
        assert_eq!(result.path, None);
    }

    #[test]
    fn test_full_tree_without_destination() {
        let result: ShortestPathResult<i32> = shortest_path(0_i32, None, line_graph_neighbors);

        assert_eq!(result.distance, None);
        assert_eq!(result.path, None);

        // Every vertex but the start has a predecessor, and following them reaches the start.
        assert_eq!(result.predecessors.len(), 4_usize);

        for vertex in 1_i32..5_i32 {
            assert_eq!(result.predecessors[&vertex], vertex - 1_i32);
        }
    }

    #[test]
    fn test_weighted_detour() {
        // 0 -> 2 directly costs 10; 0 -> 1 -> 2 costs 3.
        let result: ShortestPathResult<i32> = shortest_path(
            0_i32,
            Some(2_i32),
            |vertex: &i32, neighbors: &mut Vec<OpenSetElement<i32, u32>>| match *vertex {
                0_i32 => {
                    neighbors.push(OpenSetElement(2_i32, 10_u32));
                    neighbors.push(OpenSetElement(1_i32, 1_u32));
                }
                1_i32 => neighbors.push(OpenSetElement(2_i32, 2_u32)),
                _ => {}
            },
        );

        assert_eq!(result.distance, Some(3_u32));
        assert_eq!(result.path, Some(vec![0_i32, 1_i32, 2_i32]));
    }
}
