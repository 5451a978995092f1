//! HDBSCAN over cosine distance, plus centroid-based cluster reduction.
//!
//! # Algorithm
//!
//! 1. Pairwise cosine distances between all points
//! 2. Core distance: distance to the `min_cluster_size`-th nearest point
//!    (the point itself included)
//! 3. Minimum spanning tree over mutual reachability distance
//!    `max(core(a), core(b), d(a, b))`
//! 4. Single-linkage hierarchy from the sorted tree edges
//! 5. Condensed tree: splits where both sides have at least
//!    `min_cluster_size` points create new clusters, smaller sides fall out
//! 6. Excess-of-mass selection of the most stable clusters; the root is
//!    never selected
//!
//! Points not under a selected cluster are labeled `NOISE`. Nothing here is
//! randomized: identical embeddings always give identical labels.
//!
//! Time and space are O(n²); slices are capped well below where that matters.

use std::collections::VecDeque;

use ndarray::Array1;
use rayon::prelude::*;
use reviewlens_infer::cosine_similarity;

/// Label for points outside every cluster.
pub const NOISE: i32 = -1;

/// Floor for merge distances so duplicate points get a finite lambda.
const MIN_DISTANCE: f64 = 1e-10;

/// Hierarchical density-based clustering.
#[derive(Debug, Clone)]
pub struct Hdbscan {
    min_cluster_size: usize,
}

struct Merge {
    left: usize,
    right: usize,
    distance: f64,
    size: usize,
}

/// Edge of the condensed tree. Children below `n` are points, the rest are
/// cluster labels.
struct CondensedEdge {
    parent: usize,
    child: usize,
    lambda: f64,
    size: usize,
}

impl Hdbscan {
    pub fn new(min_cluster_size: usize) -> Self {
        Self {
            min_cluster_size: min_cluster_size.max(2),
        }
    }

    pub fn min_cluster_size(&self) -> usize {
        self.min_cluster_size
    }

    /// Cluster labels per point, `0..k` for clusters and `NOISE` otherwise.
    pub fn fit(&self, points: &[Array1<f32>]) -> Vec<i32> {
        let n = points.len();
        if n < self.min_cluster_size {
            return vec![NOISE; n];
        }

        let distances = cosine_distances(points);
        let core = core_distances(&distances, self.min_cluster_size);
        let edges = mutual_reachability_mst(&distances, &core);
        let merges = single_linkage(n, &edges);
        let condensed = condense(&merges, n, self.min_cluster_size);
        let selected = select_clusters(&condensed, n);
        label_points(&condensed, &selected, n)
    }
}

fn cosine_distances(points: &[Array1<f32>]) -> Vec<Vec<f64>> {
    (0..points.len())
        .into_par_iter()
        .map(|i| {
            (0..points.len())
                .map(|j| {
                    if i == j {
                        0.0
                    } else {
                        (1.0 - cosine_similarity(&points[i], &points[j]) as f64).max(0.0)
                    }
                })
                .collect()
        })
        .collect()
}

fn core_distances(distances: &[Vec<f64>], k: usize) -> Vec<f64> {
    distances
        .par_iter()
        .map(|row| {
            let mut sorted = row.clone();
            sorted.sort_by(|a, b| a.total_cmp(b));
            sorted[(k - 1).min(sorted.len() - 1)]
        })
        .collect()
}

/// Prim's algorithm on the dense mutual reachability graph. Edges come back
/// sorted by weight; equal weights keep discovery order.
fn mutual_reachability_mst(distances: &[Vec<f64>], core: &[f64]) -> Vec<(usize, usize, f64)> {
    let n = distances.len();
    let mut in_tree = vec![false; n];
    let mut best = vec![f64::INFINITY; n];
    let mut from = vec![0usize; n];
    let mut edges = Vec::with_capacity(n.saturating_sub(1));

    let mut current = 0;
    in_tree[0] = true;
    for _ in 1..n {
        for j in 0..n {
            if in_tree[j] {
                continue;
            }
            let reach = distances[current][j].max(core[current]).max(core[j]);
            if reach < best[j] {
                best[j] = reach;
                from[j] = current;
            }
        }

        let mut next = None;
        for j in 0..n {
            if in_tree[j] {
                continue;
            }
            match next {
                Some(k) if best[k] <= best[j] => {}
                _ => next = Some(j),
            }
        }
        let Some(next) = next else { break };

        in_tree[next] = true;
        edges.push((from[next], next, best[next]));
        current = next;
    }

    edges.sort_by(|a, b| a.2.total_cmp(&b.2));
    edges
}

fn find(parent: &mut [usize], mut i: usize) -> usize {
    let mut root = i;
    while parent[root] != root {
        root = parent[root];
    }
    while parent[i] != root {
        let next = parent[i];
        parent[i] = root;
        i = next;
    }
    root
}

/// Merge `k` creates node `n + k`; the last merge is the root.
fn single_linkage(n: usize, edges: &[(usize, usize, f64)]) -> Vec<Merge> {
    let mut parent: Vec<usize> = (0..2 * n - 1).collect();
    let mut size = vec![1usize; 2 * n - 1];
    let mut merges = Vec::with_capacity(n - 1);

    for (k, &(a, b, distance)) in edges.iter().enumerate() {
        let left = find(&mut parent, a);
        let right = find(&mut parent, b);
        let node = n + k;
        size[node] = size[left] + size[right];
        parent[left] = node;
        parent[right] = node;
        merges.push(Merge {
            left,
            right,
            distance,
            size: size[node],
        });
    }
    merges
}

fn leaves(merges: &[Merge], n: usize, node: usize) -> Vec<usize> {
    let mut out = Vec::new();
    let mut stack = vec![node];
    while let Some(x) = stack.pop() {
        if x < n {
            out.push(x);
        } else {
            let m = &merges[x - n];
            stack.push(m.right);
            stack.push(m.left);
        }
    }
    out
}

fn condense(merges: &[Merge], n: usize, min_size: usize) -> Vec<CondensedEdge> {
    let root = 2 * n - 2;
    let node_size = |node: usize| if node < n { 1 } else { merges[node - n].size };

    let mut relabel = vec![0usize; 2 * n - 1];
    relabel[root] = n;
    let mut next_label = n + 1;
    let mut out = Vec::new();

    let mut queue = VecDeque::from([root]);
    while let Some(node) = queue.pop_front() {
        if node < n {
            continue;
        }
        let merge = &merges[node - n];
        let lambda = 1.0 / merge.distance.max(MIN_DISTANCE);
        let parent = relabel[node];
        let (left, right) = (merge.left, merge.right);
        let (left_size, right_size) = (node_size(left), node_size(right));

        match (left_size >= min_size, right_size >= min_size) {
            (true, true) => {
                for (child, size) in [(left, left_size), (right, right_size)] {
                    relabel[child] = next_label;
                    next_label += 1;
                    out.push(CondensedEdge {
                        parent,
                        child: relabel[child],
                        lambda,
                        size,
                    });
                    queue.push_back(child);
                }
            }
            (false, false) => {
                for child in [left, right] {
                    for point in leaves(merges, n, child) {
                        out.push(CondensedEdge {
                            parent,
                            child: point,
                            lambda,
                            size: 1,
                        });
                    }
                }
            }
            (left_big, _) => {
                let (kept, dropped) = if left_big { (left, right) } else { (right, left) };
                relabel[kept] = parent;
                for point in leaves(merges, n, dropped) {
                    out.push(CondensedEdge {
                        parent,
                        child: point,
                        lambda,
                        size: 1,
                    });
                }
                queue.push_back(kept);
            }
        }
    }
    out
}

/// Excess-of-mass selection. Index `c` stands for cluster label `n + c`;
/// index 0 is the root.
fn select_clusters(tree: &[CondensedEdge], n: usize) -> Vec<bool> {
    let count = tree
        .iter()
        .map(|e| e.parent.max(e.child))
        .max()
        .map_or(1, |max| max.max(n) - n + 1);

    let mut birth = vec![0.0f64; count];
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); count];
    for e in tree.iter().filter(|e| e.child >= n) {
        birth[e.child - n] = e.lambda;
        children[e.parent - n].push(e.child - n);
    }

    let mut stability = vec![0.0f64; count];
    for e in tree {
        let p = e.parent - n;
        stability[p] += (e.lambda - birth[p]) * e.size as f64;
    }

    let mut selected = vec![true; count];
    selected[0] = false;
    // Children always carry higher labels than their parent.
    for c in (1..count).rev() {
        let subtree: f64 = children[c].iter().map(|&k| stability[k]).sum();
        if subtree > stability[c] {
            selected[c] = false;
            stability[c] = subtree;
        } else {
            let mut stack = children[c].clone();
            while let Some(d) = stack.pop() {
                selected[d] = false;
                stack.extend(children[d].iter().copied());
            }
        }
    }
    selected
}

fn label_points(tree: &[CondensedEdge], selected: &[bool], n: usize) -> Vec<i32> {
    let mut cluster_parent = vec![None; selected.len()];
    let mut point_parent = vec![n; n];
    for e in tree {
        if e.child >= n {
            cluster_parent[e.child - n] = Some(e.parent - n);
        } else {
            point_parent[e.child] = e.parent;
        }
    }

    let mut ids = vec![NOISE; selected.len()];
    let mut next = 0;
    for (c, &is_selected) in selected.iter().enumerate() {
        if is_selected {
            ids[c] = next;
            next += 1;
        }
    }

    point_parent
        .iter()
        .map(|&parent| {
            let mut cluster = Some(parent - n);
            while let Some(c) = cluster {
                if selected[c] {
                    return ids[c];
                }
                cluster = cluster_parent[c];
            }
            NOISE
        })
        .collect()
}

fn centroid(points: &[Array1<f32>], members: &[usize]) -> Array1<f32> {
    let dim = points.first().map_or(0, |p| p.len());
    let mut sum = Array1::<f32>::zeros(dim);
    for &i in members {
        sum += &points[i];
    }
    if !members.is_empty() {
        sum /= members.len() as f32;
    }
    sum
}

/// Merge clusters until at most `target` remain.
///
/// Each step folds the least populous cluster (the later one on ties) into
/// the cluster whose centroid is most similar by cosine. Surviving clusters
/// are renumbered `0..k` in their original order; `NOISE` is untouched.
pub fn reduce_clusters(labels: &[i32], points: &[Array1<f32>], target: usize) -> Vec<i32> {
    let count = labels.iter().copied().max().map_or(0, |m| (m + 1).max(0) as usize);
    let mut members: Vec<Vec<usize>> = vec![Vec::new(); count];
    for (i, &label) in labels.iter().enumerate() {
        if label >= 0 {
            members[label as usize].push(i);
        }
    }
    let mut alive: Vec<usize> = (0..count).filter(|&c| !members[c].is_empty()).collect();
    let mut centroids: Vec<Array1<f32>> = members.iter().map(|m| centroid(points, m)).collect();

    let target = target.max(1);
    while alive.len() > target {
        let Some(&smallest) = alive
            .iter()
            .rev()
            .min_by_key(|&&c| members[c].len())
        else {
            break;
        };

        let mut into: Option<(usize, f32)> = None;
        for &c in &alive {
            if c == smallest {
                continue;
            }
            let sim = cosine_similarity(&centroids[smallest], &centroids[c]);
            match into {
                Some((_, best)) if best >= sim => {}
                _ => into = Some((c, sim)),
            }
        }
        let Some((into, _)) = into else { break };

        let moved = std::mem::take(&mut members[smallest]);
        members[into].extend(moved);
        members[into].sort_unstable();
        centroids[into] = centroid(points, &members[into]);
        alive.retain(|&c| c != smallest);
    }

    let mut out = vec![NOISE; labels.len()];
    for (new_id, &c) in alive.iter().enumerate() {
        for &i in &members[c] {
            out[i] = new_id as i32;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn repeat(v: Array1<f32>, times: usize) -> Vec<Array1<f32>> {
        vec![v; times]
    }

    fn same_partition(labels: &[i32], groups: &[std::ops::Range<usize>]) -> bool {
        groups.iter().all(|g| {
            let first = labels[g.start];
            first != NOISE && labels[g.clone()].iter().all(|&l| l == first)
        })
    }

    #[test]
    fn test_too_few_points_are_noise() {
        let points = repeat(array![1.0, 0.0], 4);
        assert_eq!(Hdbscan::new(5).fit(&points), vec![NOISE; 4]);
        assert!(Hdbscan::new(5).fit(&[]).is_empty());
    }

    #[test]
    fn test_min_cluster_size_floor() {
        assert_eq!(Hdbscan::new(0).min_cluster_size(), 2);
        assert_eq!(Hdbscan::new(30).min_cluster_size(), 30);
    }

    #[test]
    fn test_two_dense_groups_and_an_outlier() {
        let mut points = repeat(array![1.0, 0.0, 0.0], 5);
        points.extend(repeat(array![0.6, 0.8, 0.0], 5));
        points.push(array![0.0, 0.0, 1.0]);

        let labels = Hdbscan::new(3).fit(&points);
        assert!(same_partition(&labels, &[0..5, 5..10]));
        assert_ne!(labels[0], labels[5]);
        assert_eq!(labels[10], NOISE);
    }

    #[test]
    fn test_single_dense_group_is_not_a_cluster() {
        // The root is never selected
        let points = repeat(array![1.0, 0.0], 10);
        assert_eq!(Hdbscan::new(3).fit(&points), vec![NOISE; 10]);
    }

    #[test]
    fn test_labels_are_deterministic() {
        let mut points = repeat(array![1.0, 0.1, 0.0], 4);
        points.extend(repeat(array![0.0, 1.0, 0.2], 6));
        points.extend(repeat(array![0.1, 0.0, 1.0], 4));
        let a = Hdbscan::new(3).fit(&points);
        let b = Hdbscan::new(3).fit(&points);
        assert_eq!(a, b);
        assert!(same_partition(&a, &[0..4, 4..10, 10..14]));
    }

    #[test]
    fn test_reduce_merges_smallest_into_most_similar() {
        let points = vec![
            array![1.0, 0.0, 0.0],
            array![1.0, 0.0, 0.0],
            array![1.0, 0.0, 0.0],
            array![0.0, 1.0, 0.0],
            array![0.0, 1.0, 0.0],
            array![0.0, 0.9, 0.1],
            array![0.0, 0.0, 1.0],
        ];
        // Cluster 2 (one point) is closest to cluster 1
        let labels = vec![0, 0, 0, 1, 1, 2, NOISE];
        let reduced = reduce_clusters(&labels, &points, 2);
        assert_eq!(reduced, vec![0, 0, 0, 1, 1, 1, NOISE]);
    }

    #[test]
    fn test_reduce_keeps_merged_points_and_renumbers() {
        let points = vec![
            array![0.0, 0.1, 1.0],
            array![1.0, 0.0, 0.0],
            array![1.0, 0.0, 0.0],
            array![0.0, 0.0, 1.0],
            array![0.0, 0.0, 1.0],
            array![0.0, 0.0, 1.0],
        ];
        let labels = vec![0, 1, 1, 2, 2, 2];
        let reduced = reduce_clusters(&labels, &points, 2);
        assert_eq!(reduced, vec![1, 0, 0, 1, 1, 1]);
        assert_eq!(reduced.iter().filter(|&&l| l == NOISE).count(), 0);
    }

    #[test]
    fn test_reduce_noop_under_target() {
        let points = vec![array![1.0, 0.0], array![0.0, 1.0]];
        let labels = vec![0, 1];
        assert_eq!(reduce_clusters(&labels, &points, 10), labels);
        assert_eq!(reduce_clusters(&[NOISE, NOISE], &points, 1), vec![NOISE, NOISE]);
    }
}
