// cargo fuzz run encode corpus/encode -- -timeout=30

#![no_main]

use libfuzzer_sys::fuzz_target;

use gifstream::Encoder;

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }
    let width = u16::from(data[0] % 64) + 1;
    let height = u16::from(data[1] % 64) + 1;
    let depth = data[2];
    let background = if data[3] & 0x80 != 0 {
        Some(data[3] & 0x7F)
    } else {
        None
    };
    let mut enc = Encoder::new(Vec::new())
        .with_depth(depth)
        .with_background(background)
        .into_frame_enc(width, height)
        .unwrap();
    let len = usize::from(width) * usize::from(height);
    for chunk in data[4..].chunks(len) {
        for (p, v) in enc.frame_mut().iter_mut().zip(chunk) {
            *p = *v;
        }
        enc.add_frame(u16::from(chunk[0])).unwrap();
    }
    enc.finish().unwrap();
});
