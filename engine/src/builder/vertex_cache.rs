//! Vertex Cache Optimization
//!
//! Tom Forsyth's linear-speed vertex cache optimizer over primitives of any
//! arity (springs are 2-vertex primitives, triangles 3-vertex ones), plus the
//! ACMR and vertex miss ratio of an element order under a FIFO-free LRU model.

/// Cache size assumed by the optimizer.
pub const OPTIMIZER_CACHE_SIZE: usize = 32;

/// Cache size used to score candidate orderings.
pub const MEASUREMENT_CACHE_SIZE: usize = 16;

const CACHE_DECAY_POWER: f32 = 1.5;
const LAST_ELEMENT_SCORE: f32 = 0.75;
const VALENCE_BOOST_SCALE: f32 = 2.0;
const VALENCE_BOOST_POWER: f32 = 0.5;

/// Fixed-capacity LRU of vertex ids, most recent first.
#[derive(Debug, Clone)]
pub struct LruVertexCache {
    capacity: usize,
    entries: Vec<usize>,
}

impl LruVertexCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::with_capacity(capacity + 1),
        }
    }

    /// Use a vertex; returns `true` on a hit.
    pub fn use_vertex(&mut self, vertex: usize) -> bool {
        match self.position(vertex) {
            Some(pos) => {
                self.entries.remove(pos);
                self.entries.insert(0, vertex);
                true
            }
            None => {
                self.entries.insert(0, vertex);
                self.entries.truncate(self.capacity);
                false
            }
        }
    }

    pub fn position(&self, vertex: usize) -> Option<usize> {
        self.entries.iter().position(|&v| v == vertex)
    }

    pub fn entries(&self) -> &[usize] {
        &self.entries
    }
}

/// Cache statistics of an element order.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CacheMetrics {
    /// Average cache misses per element
    pub acmr: f32,
    /// Cache misses per distinct vertex
    pub vertex_miss_ratio: f32,
}

/// Replay `elements` through an LRU of `cache_size` entries.
pub fn measure<const K: usize>(elements: &[[usize; K]], cache_size: usize) -> CacheMetrics {
    if elements.is_empty() {
        return CacheMetrics::default();
    }

    let mut cache = LruVertexCache::new(cache_size);
    let mut misses = 0usize;
    let mut distinct = std::collections::HashSet::new();
    for element in elements {
        for &v in element {
            distinct.insert(v);
            if !cache.use_vertex(v) {
                misses += 1;
            }
        }
    }

    CacheMetrics {
        acmr: misses as f32 / elements.len() as f32,
        vertex_miss_ratio: misses as f32 / distinct.len() as f32,
    }
}

fn vertex_score(cache_position: Option<usize>, remaining_valence: usize, arity: usize, cache_size: usize) -> f32 {
    if remaining_valence == 0 {
        return -1.0;
    }

    let cache_score = match cache_position {
        None => 0.0,
        Some(pos) if pos < arity => LAST_ELEMENT_SCORE,
        Some(pos) => {
            let scaler = 1.0 / (cache_size - arity) as f32;
            (1.0 - (pos - arity) as f32 * scaler).max(0.0).powf(CACHE_DECAY_POWER)
        }
    };
    let valence_score = VALENCE_BOOST_SCALE * (remaining_valence as f32).powf(-VALENCE_BOOST_POWER);
    cache_score + valence_score
}

/// Reorder `elements` for vertex cache locality.
///
/// Returns the optimized order as indices into `elements`. Deterministic: score
/// ties go to the lower element index.
pub fn optimize_order<const K: usize>(elements: &[[usize; K]], vertex_count: usize) -> Vec<usize> {
    let cache_size = OPTIMIZER_CACHE_SIZE.max(K + 1);

    let mut vertex_elements: Vec<Vec<usize>> = vec![Vec::new(); vertex_count];
    for (e, element) in elements.iter().enumerate() {
        for &v in element {
            vertex_elements[v].push(e);
        }
    }
    let mut remaining: Vec<usize> = vertex_elements.iter().map(Vec::len).collect();
    let mut emitted = vec![false; elements.len()];
    let mut order = Vec::with_capacity(elements.len());
    let mut cache = LruVertexCache::new(cache_size);
    let mut cursor = 0usize;

    let score_element = |e: usize, cache: &LruVertexCache, remaining: &[usize]| -> f32 {
        elements[e]
            .iter()
            .map(|&v| vertex_score(cache.position(v), remaining[v], K, cache_size))
            .sum()
    };

    while order.len() < elements.len() {
        // Best element among those touching a cached vertex
        let mut best: Option<(usize, f32)> = None;
        for &v in cache.entries() {
            for &e in &vertex_elements[v] {
                if emitted[e] {
                    continue;
                }
                let score = score_element(e, &cache, &remaining);
                let better = match best {
                    None => true,
                    Some((best_e, best_score)) => score > best_score || (score == best_score && e < best_e),
                };
                if better {
                    best = Some((e, score));
                }
            }
        }

        let next = match best {
            Some((e, _)) => e,
            None => {
                while emitted[cursor] {
                    cursor += 1;
                }
                cursor
            }
        };

        emitted[next] = true;
        order.push(next);
        for &v in &elements[next] {
            remaining[v] -= 1;
        }
        for &v in elements[next].iter().rev() {
            cache.use_vertex(v);
        }
    }

    order
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Triangulated strip of `n` quads with row-major vertices, emitted in a
    /// scattered order.
    fn scattered_strip(n: usize) -> Vec<[usize; 3]> {
        let mut triangles = Vec::new();
        for i in 0..n {
            let (a, b, c, d) = (i, i + 1, n + 2 + i, n + 1 + i);
            triangles.push([a, b, c]);
            triangles.push([a, c, d]);
        }
        // Interleave far-apart quads
        let (even, odd): (Vec<_>, Vec<_>) = triangles.chunks(2).enumerate().partition(|(i, _)| i % 2 == 0);
        even.into_iter()
            .chain(odd)
            .flat_map(|(_, pair)| pair.to_vec())
            .collect()
    }

    #[test]
    fn lru_hits_and_evicts() {
        let mut cache = LruVertexCache::new(2);
        assert!(!cache.use_vertex(1));
        assert!(!cache.use_vertex(2));
        assert!(cache.use_vertex(1));
        assert!(!cache.use_vertex(3));
        assert_eq!(cache.entries(), &[3, 1]);
    }

    #[test]
    fn optimized_order_is_a_permutation() {
        let triangles = scattered_strip(40);
        let mut order = optimize_order(&triangles, 82);
        order.sort_unstable();
        assert_eq!(order, (0..triangles.len()).collect::<Vec<_>>());
    }

    #[test]
    fn optimizer_does_not_worsen_small_cache_acmr() {
        let triangles = scattered_strip(40);
        let before = measure(&triangles, 4);
        let order = optimize_order(&triangles, 82);
        let optimized: Vec<[usize; 3]> = order.iter().map(|&i| triangles[i]).collect();
        let after = measure(&optimized, 4);
        assert!(after.acmr <= before.acmr, "{:?} > {:?}", after, before);
    }

    #[test]
    fn measure_counts_every_first_use_as_miss() {
        let metrics = measure(&[[0, 1, 2], [0, 2, 3]], 16);
        assert!((metrics.acmr - 2.0).abs() < 1e-6);
        assert!((metrics.vertex_miss_ratio - 1.0).abs() < 1e-6);
    }

    #[test]
    fn springs_optimize_as_pairs() {
        let springs = [[0, 1], [5, 6], [1, 2], [6, 7], [2, 3]];
        let order = optimize_order(&springs, 8);
        assert_eq!(order.len(), springs.len());
        // The chain through vertex 1 stays together
        let first = order.iter().position(|&i| i == 0).unwrap();
        assert_eq!(order[first + 1], 2);
    }
}
