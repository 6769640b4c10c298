// 1-indexed, slot 0 unused; position[v] is the slot of v while queued and 0 otherwise
pub struct IndexedMinHeap<Key> {
    heap: Vec<usize>,
    position: Vec<usize>,
    keys: Vec<Option<Key>>,
}

impl<Key> Default for IndexedMinHeap<Key> {
    fn default() -> Self {
        Self { heap: vec![usize::MAX], position: Vec::new(), keys: Vec::new() }
    }
}

#[inline]
fn parent(i: usize) -> usize {
    i / 2
}

#[inline]
fn left_child(i: usize) -> usize {
    i * 2
}

impl<Key> IndexedMinHeap<Key>
where
    Key: Ord + Copy,
{
    pub fn new(num_nodes: usize) -> Self {
        let mut heap = Self::default();
        heap.reset(num_nodes);
        heap
    }

    pub fn reset(&mut self, num_nodes: usize) {
        self.heap.truncate(1);
        self.position.clear();
        self.position.resize(num_nodes, 0);
        self.keys.clear();
        self.keys.resize(num_nodes, None);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len() - 1
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.len() == 1
    }

    #[inline]
    pub fn contains(&self, v: usize) -> bool {
        self.position[v] != 0
    }

    pub fn insert(&mut self, v: usize, key: Key) {
        debug_assert!(!self.contains(v));
        self.keys[v] = Some(key);
        self.heap.push(v);
        self.heapify_up(self.heap.len() - 1);
    }

    pub fn extract_min(&mut self) -> Option<(usize, Key)> {
        if self.is_empty() {
            return None;
        }

        let v = self.heap[1];
        let last = self.heap.pop()?;
        if !self.is_empty() {
            self.set(1, last);
            self.heapify_down(1);
        }
        self.position[v] = 0;
        self.keys[v].map(|key| (v, key))
    }

    // key must not be larger than the current one
    pub fn decrease_key(&mut self, v: usize, key: Key) {
        debug_assert!(self.contains(v));
        debug_assert!(self.keys[v].map_or(true, |old| key <= old));
        self.keys[v] = Some(key);
        self.heapify_up(self.position[v]);
    }

    fn heapify_up(&mut self, mut i: usize) {
        let v = self.heap[i];
        while i > 1 && self.keys[v] < self.keys[self.heap[parent(i)]] {
            self.set(i, self.heap[parent(i)]);
            i = parent(i);
        }
        self.set(i, v);
    }

    fn heapify_down(&mut self, mut i: usize) {
        let v = self.heap[i];
        loop {
            let mut k = left_child(i);
            if k >= self.heap.len() {
                break;
            }
            if k + 1 < self.heap.len() && self.keys[self.heap[k + 1]] < self.keys[self.heap[k]] {
                k += 1;
            }
            if self.keys[self.heap[k]] >= self.keys[v] {
                break;
            }
            self.set(i, self.heap[k]);
            i = k;
        }
        self.set(i, v);
    }

    #[inline]
    fn set(&mut self, i: usize, v: usize) {
        self.heap[i] = v;
        self.position[v] = i;
    }
}
