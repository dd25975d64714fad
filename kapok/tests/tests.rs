#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use jiff::SignedDuration;

    use kapok::entities::{Capture, MappingSession, SessionConfig, SessionState};
    use kapok::geometry::GeoPoint;
    use kapok::geometry::measure::{self, Closure};
    use kapok::position::{
        PositionError, PositionSource, SimulatedPositionSource, SimulatedSourceConfig,
    };
    use kapok::risk::RiskTable;

    const TIMEOUT: SignedDuration = SignedDuration::from_secs(10);

    //the Lofa county border walk, 3 fixes
    const WALK: [(f64, f64); 3] = [
        (7.225282, -9.003844),
        (7.225390, -9.003720),
        (7.225450, -9.003580),
    ];

    fn init_test_logger() {
        let _ = env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .try_init();
    }

    fn fresh_session() -> MappingSession {
        MappingSession::new(SessionConfig::default(), RiskTable::default())
    }

    #[test]
    fn test_three_point_walk_end_to_end() {
        init_test_logger();
        let mut session = fresh_session();
        for (lat, lng) in WALK {
            session.append(GeoPoint::new(lat, lng)).unwrap();
        }

        //3 points meet the default minimum, but the boundary stays an open
        //chain of 2 segments until completion is requested explicitly
        assert!(session.boundary().is_complete(3));
        assert!(session.area_hectares() > 0.0);
        let two_segments = measure::haversine_m(WALK[0].into(), WALK[1].into())
            + measure::haversine_m(WALK[1].into(), WALK[2].into());
        assert!((session.perimeter_m() - two_segments).abs() < 1e-9);

        let assessment = session.complete().unwrap();
        assert_eq!(session.state(), SessionState::Complete);
        assert!(assessment.perimeter_m > two_segments);
    }

    #[test]
    fn test_vertex_count_grows_monotonically() {
        let mut session = fresh_session();
        let min_points = session.config().compliance.min_boundary_points;
        let mut previous = 0;

        for (i, (lat, lng)) in WALK.iter().cycle().take(8).enumerate() {
            let n = match session.append(GeoPoint::new(*lat, *lng)).unwrap() {
                Capture::Accepted(n) => n,
                skipped => panic!("ungated session skipped a fix: {skipped:?}"),
            };
            assert!(n > previous);
            previous = n;
            assert_eq!(session.boundary().is_complete(min_points), i + 1 >= min_points);
        }
    }

    #[test]
    fn test_watch_subscription_drives_a_session() {
        init_test_logger();
        let config = SimulatedSourceConfig {
            prng_seed: Some(0),
            ..SimulatedSourceConfig::default()
        };
        let mut source =
            SimulatedPositionSource::from_walk(WALK.map(GeoPoint::from), config);

        let session = Rc::new(RefCell::new(fresh_session()));
        let failures = Rc::new(RefCell::new(Vec::new()));
        let handle = {
            let session = Rc::clone(&session);
            let failures = Rc::clone(&failures);
            source.watch(
                Box::new(move |fix| {
                    session.borrow_mut().append(fix).unwrap();
                }),
                Box::new(move |e| failures.borrow_mut().push(e)),
            )
        };

        //the scheduler loop lives outside the engine and drives the public API
        while source.advance() {}
        source.cancel_watch(handle);
        assert!(!source.advance());

        let mut session = Rc::into_inner(session).unwrap().into_inner();
        assert!(failures.borrow().is_empty());
        assert_eq!(session.boundary().n_vertices(), WALK.len());
        assert!(session.complete().is_ok());
    }

    #[test]
    fn test_single_shot_timeout_recovers_through_fallback() {
        init_test_logger();
        let fallback = SimulatedPositionSource::from_walk(
            WALK.map(GeoPoint::from),
            SimulatedSourceConfig::default(),
        );
        let mut session = fresh_session().with_fallback(fallback);

        //a device that takes longer than any caller is willing to wait
        let mut slow = SimulatedPositionSource::from_walk(
            WALK.map(GeoPoint::from),
            SimulatedSourceConfig {
                latency: SignedDuration::from_secs(60),
                ..SimulatedSourceConfig::default()
            },
        );
        assert_eq!(
            slow.current_fix(TIMEOUT).unwrap_err(),
            PositionError::Timeout
        );

        for _ in 0..WALK.len() {
            let outcome = session.capture_from(&mut slow, TIMEOUT).unwrap();
            assert!(matches!(outcome, Capture::Accepted(_)));
        }
        assert_eq!(session.boundary().n_vertices(), WALK.len());
    }

    #[test]
    fn test_reassessing_an_untouched_session_is_stable() {
        let mut session = fresh_session();
        for (lat, lng) in WALK {
            session
                .append(GeoPoint::with_accuracy(lat, lng, 3.0))
                .unwrap();
        }
        session.complete().unwrap();

        let assessments: Vec<_> = (0..3).map(|_| session.assess()).collect();
        assert_eq!(assessments[0], assessments[1]);
        assert_eq!(assessments[1], assessments[2]);
    }
}
