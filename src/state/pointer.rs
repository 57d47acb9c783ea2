// Per-gesture pointer/touch session state.
#[derive(Default, Debug, Clone)]
pub struct PointerSession {
    /// True while a press or single-touch drag is in flight.
    pub locked: bool,
    /// Last seen contact point, in client coordinates.
    pub last_xy: [f64; 2],
    /// The two contact points recorded by the previous pinch event.
    pub touch_pair: Option<[[f64; 2]; 2]>,
}

impl PointerSession {
    pub fn lock(&mut self, point: [f64; 2]) {
        self.locked = true;
        self.last_xy = point;
    }

    pub fn unlock(&mut self) {
        self.locked = false;
        self.touch_pair = None;
    }
}
