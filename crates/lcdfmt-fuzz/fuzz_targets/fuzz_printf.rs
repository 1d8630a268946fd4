#![no_main]
use libfuzzer_sys::fuzz_target;

use lcdfmt_core::{Arg, CountingSink, FormatConfig, SliceSink, measure, render, vprintf};

// First bytes pick arguments; the rest is the format.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    let n_args = usize::from(data[0] % 9);
    let (head, format) = data[1..].split_at(data.len().saturating_sub(1).min(n_args * 2));

    let mut args = [Arg::Int(0); 8];
    for (slot, pair) in args.iter_mut().zip(head.chunks(2)) {
        let v = pair.get(1).copied().unwrap_or(0);
        *slot = match pair[0] % 4 {
            0 => Arg::Int(i64::from(v as i8) * 37),
            1 => Arg::Float(f64::from(v as i8) / 3.0),
            2 => Arg::Char(v),
            _ => Arg::Text(&format[..format.len().min(usize::from(v % 8))]),
        };
    }
    let args = &args[..head.len().div_ceil(2)];

    let lenient = FormatConfig::new();
    let mut buf = [0u8; 512];
    let mut sink = SliceSink::new(&mut buf);
    let outcome = render(&mut sink, format, args, &lenient);
    assert_eq!(outcome.written + sink.dropped(), measure(format, args, &lenient));

    // Strict output is a prefix of lenient output.
    let mut strict_buf = [0u8; 512];
    let mut strict_sink = SliceSink::new(&mut strict_buf);
    let _ = vprintf(&mut strict_sink, format, args, &lenient.strict());
    let prefix = strict_sink.as_bytes();
    assert_eq!(prefix, &sink.as_bytes()[..prefix.len()]);

    let mut counter = CountingSink::new();
    let _ = render(&mut counter, format, args, &lenient.with_force_sign(true));
});
