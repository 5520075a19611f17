use device_scanner_lib::scan::{extract_lines, resolve_serial};
use proptest::prelude::*;

fn single_line_strategy() -> impl Strategy<Value = String> {
    "[ \t]{0,3}[A-Za-z0-9:;/ -]{0,24}[ \t]{0,3}"
}

fn payload_strategy() -> impl Strategy<Value = String> {
    proptest::collection::vec("[A-Za-z0-9: -]{0,16}", 0..6).prop_flat_map(|lines| {
        let n = lines.len().saturating_sub(1);
        (
            Just(lines),
            proptest::collection::vec(prop_oneof![Just("\n"), Just("\r\n"), Just("\r\r\n\n")], n),
        )
            .prop_map(|(lines, seps)| {
                let mut out = String::new();
                for (i, line) in lines.iter().enumerate() {
                    out.push_str(line);
                    if let Some(sep) = seps.get(i) {
                        out.push_str(sep);
                    }
                }
                out
            })
    })
}

proptest! {
    #[test]
    fn single_line_input_is_returned_trimmed(input in single_line_strategy()) {
        prop_assert_eq!(resolve_serial(&input), input.trim());
    }

    #[test]
    fn resolution_is_deterministic(payload in payload_strategy()) {
        prop_assert_eq!(resolve_serial(&payload), resolve_serial(&payload));
    }

    #[test]
    fn resolved_serial_is_one_of_the_lines(payload in payload_strategy()) {
        let serial = resolve_serial(&payload);
        let lines: Vec<&str> = extract_lines(&payload).collect();
        if lines.is_empty() {
            prop_assert_eq!(serial, "");
        } else {
            prop_assert!(lines.contains(&serial.as_str()));
        }
    }

    #[test]
    fn extracted_lines_are_trimmed_and_non_empty(payload in payload_strategy()) {
        for line in extract_lines(&payload) {
            prop_assert!(!line.is_empty());
            prop_assert_eq!(line, line.trim());
            prop_assert!(!line.contains('\n') && !line.contains('\r'));
        }
    }
}
