//! Geometry of the 60-tick clock face drawn around the readout.
//! Terminal cells are roughly twice as tall as wide, so the horizontal
//! radius is doubled to keep the face round.

pub const TICK_COUNT: usize = 60;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Tick {
    pub index: usize,
    pub x: u16,
    pub y: u16,
    /// Every fifth tick.
    pub major: bool,
}

/// Tick positions, clockwise from twelve o'clock.
pub fn ticks(center: (u16, u16), radius_y: u16) -> Vec<Tick> {
    let (cx, cy) = (center.0 as f64, center.1 as f64);
    let ry = radius_y as f64;
    let rx = ry * 2.0;

    (0..TICK_COUNT)
        .map(|index| {
            let angle = (index as f64 * 6.0).to_radians();
            let x = (cx + rx * angle.sin()).round().max(0.0);
            let y = (cy - ry * angle.cos()).round().max(0.0);
            Tick {
                index,
                x: x as u16,
                y: y as u16,
                major: index % 5 == 0,
            }
        })
        .collect()
}

/// How many ticks the progress ring covers for `fraction` of a turn.
pub fn lit_ticks(fraction: f64) -> usize {
    ((fraction.clamp(0.0, 1.0) * TICK_COUNT as f64).ceil() as usize).min(TICK_COUNT)
}

pub fn glyph(tick: &Tick, lit: bool) -> char {
    match (tick.major, lit) {
        (true, true) => '●',
        (true, false) => '○',
        (false, true) => '•',
        (false, false) => '·',
    }
}
