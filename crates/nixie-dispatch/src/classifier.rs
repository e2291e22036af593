//! Failure classification
//!
//! Decides whether a captured invocation failure originated at the dispatch
//! boundary (the caller asked for something invalid) or deeper inside
//! legitimately executing callee code (the callee's own logic failed). The
//! answer determines whether a single bad request may crash an otherwise
//! healthy actor.

use nixie_core::{Frame, MethodName, Trace};

/// Whose fault a classified failure is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fault {
    /// The request itself was malformed; the callee survives
    Caller,
    /// The callee's own logic failed; the callee is torn down
    Callee,
}

/// Classify a missing-method failure
///
/// Walks frames innermost to outermost. Reaching the dispatch-boundary
/// marker before anything else means every frame between the raise point and
/// the boundary was miss-handler machinery: the failure came from resolving
/// the call itself, the caller's fault. Any frame that is not the miss
/// handler means the failure surfaced from code the callee legitimately
/// executed: the callee's fault. Exhausting the trace is the same default as
/// hitting the boundary.
pub fn classify_missing_method(trace: &Trace) -> Fault {
    for frame in trace.iter() {
        match frame {
            Frame::Boundary => return Fault::Caller,
            Frame::MissHandler => continue,
            Frame::Method(_) => return Fault::Callee,
        }
    }
    Fault::Caller
}

/// Classify an invalid-arguments failure
///
/// An arity or shape failure raised immediately on invoking the requested
/// method - frame 0 names that method and frame 1 is exactly the dispatch
/// boundary - reflects a malformed call. Anything raised past frame 1
/// reflects logic inside the method using arguments incorrectly.
pub fn classify_invalid_arguments(trace: &Trace, method: &MethodName) -> Fault {
    let raised_on_entry = trace
        .frame(0)
        .is_some_and(|frame| frame.is_method(method.as_str()))
        && trace.frame(1) == Some(&Frame::Boundary);

    if raised_on_entry {
        Fault::Caller
    } else {
        Fault::Callee
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn method(name: &str) -> MethodName {
        MethodName::new(name).unwrap()
    }

    // =========================================================================
    // Missing method
    // =========================================================================

    #[test]
    fn test_miss_at_boundary_is_caller_fault() {
        let trace = Trace::from_frames([Frame::MissHandler, Frame::Boundary]);
        assert_eq!(classify_missing_method(&trace), Fault::Caller);
    }

    #[test]
    fn test_boundary_alone_is_caller_fault() {
        let trace = Trace::from_frames([Frame::Boundary]);
        assert_eq!(classify_missing_method(&trace), Fault::Caller);
    }

    #[test]
    fn test_exhausted_trace_defaults_to_caller_fault() {
        let trace = Trace::from_frames([Frame::MissHandler, Frame::MissHandler]);
        assert_eq!(classify_missing_method(&trace), Fault::Caller);

        assert_eq!(classify_missing_method(&Trace::new()), Fault::Caller);
    }

    #[test]
    fn test_miss_through_callee_code_is_callee_fault() {
        // A real callee frame between the raise point and the boundary means
        // the missing method was called from inside legitimate work.
        let trace = Trace::from_frames([
            Frame::MissHandler,
            Frame::method("relay"),
            Frame::Boundary,
        ]);
        assert_eq!(classify_missing_method(&trace), Fault::Callee);
    }

    #[test]
    fn test_miss_with_innermost_callee_frame_is_callee_fault() {
        let trace = Trace::from_frames([Frame::method("helper"), Frame::Boundary]);
        assert_eq!(classify_missing_method(&trace), Fault::Callee);
    }

    // =========================================================================
    // Invalid arguments
    // =========================================================================

    #[test]
    fn test_arity_error_on_entry_is_caller_fault() {
        let trace = Trace::from_frames([Frame::method("add"), Frame::Boundary]);
        assert_eq!(classify_invalid_arguments(&trace, &method("add")), Fault::Caller);
    }

    #[test]
    fn test_arity_error_for_other_method_is_callee_fault() {
        // Frame 0 names a different method than the one requested: the
        // failure was raised by a nested call the callee made itself.
        let trace = Trace::from_frames([Frame::method("helper"), Frame::Boundary]);
        assert_eq!(classify_invalid_arguments(&trace, &method("add")), Fault::Callee);
    }

    #[test]
    fn test_arity_error_past_the_boundary_frame_is_callee_fault() {
        // Frame 1 is callee code, not the boundary: the failure was raised
        // after the requested method had already started executing.
        let trace = Trace::from_frames([
            Frame::method("add"),
            Frame::method("relay"),
            Frame::Boundary,
        ]);
        assert_eq!(classify_invalid_arguments(&trace, &method("add")), Fault::Callee);
    }

    #[test]
    fn test_short_traces_are_callee_fault() {
        let trace = Trace::from_frames([Frame::method("add")]);
        assert_eq!(classify_invalid_arguments(&trace, &method("add")), Fault::Callee);

        assert_eq!(
            classify_invalid_arguments(&Trace::new(), &method("add")),
            Fault::Callee
        );
    }

    #[test]
    fn test_boundary_at_frame_zero_is_callee_fault() {
        let trace = Trace::from_frames([Frame::Boundary, Frame::Boundary]);
        assert_eq!(classify_invalid_arguments(&trace, &method("add")), Fault::Callee);
    }
}
