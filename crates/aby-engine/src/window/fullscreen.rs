/// The parts of a monitor video mode that matter for selection.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct VideoModeSpec {
    pub width: u32,
    pub height: u32,
    pub refresh_millihertz: u32,
}

/// Picks the video mode closest to `width`x`height`.
///
/// Size distance dominates. Among equally close sizes, the refresh rate
/// closest to `refresh_hz` wins, or the highest one when no rate is given.
/// Returns the index into `modes`, or `None` when the list is empty.
pub fn choose_video_mode(
    modes: &[VideoModeSpec],
    width: u32,
    height: u32,
    refresh_hz: Option<u32>,
) -> Option<usize> {
    let target_mhz = refresh_hz.map(|hz| u64::from(hz) * 1000);

    modes
        .iter()
        .enumerate()
        .min_by_key(|(_, m)| {
            let size_distance =
                u64::from(m.width.abs_diff(width)) + u64::from(m.height.abs_diff(height));
            let refresh = u64::from(m.refresh_millihertz);
            let refresh_key = match target_mhz {
                Some(t) => refresh.abs_diff(t),
                None => u64::MAX - refresh,
            };
            (size_distance, refresh_key)
        })
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mode(width: u32, height: u32, hz: u32) -> VideoModeSpec {
        VideoModeSpec { width, height, refresh_millihertz: hz * 1000 }
    }

    #[test]
    fn empty_list_has_no_choice() {
        assert_eq!(choose_video_mode(&[], 800, 600, None), None);
    }

    #[test]
    fn exact_size_wins() {
        let modes = [mode(1920, 1080, 60), mode(800, 600, 60), mode(1024, 768, 60)];
        assert_eq!(choose_video_mode(&modes, 800, 600, None), Some(1));
    }

    #[test]
    fn highest_refresh_without_request() {
        let modes = [mode(1920, 1080, 60), mode(1920, 1080, 144), mode(1920, 1080, 120)];
        assert_eq!(choose_video_mode(&modes, 1920, 1080, None), Some(1));
    }

    #[test]
    fn closest_refresh_with_request() {
        let modes = [mode(1920, 1080, 60), mode(1920, 1080, 144), mode(1920, 1080, 120)];
        assert_eq!(choose_video_mode(&modes, 1920, 1080, Some(100)), Some(2));
        assert_eq!(choose_video_mode(&modes, 1920, 1080, Some(59)), Some(0));
    }

    #[test]
    fn size_beats_refresh() {
        let modes = [mode(1280, 720, 60), mode(1920, 1080, 144)];
        assert_eq!(choose_video_mode(&modes, 1280, 720, Some(144)), Some(0));
    }

    #[test]
    fn nearest_size_when_no_exact_match() {
        let modes = [mode(640, 480, 60), mode(1280, 720, 60), mode(1920, 1080, 60)];
        assert_eq!(choose_video_mode(&modes, 1366, 768, None), Some(1));
    }

    #[test]
    fn fractional_refresh_rates() {
        let modes = [
            VideoModeSpec { width: 1920, height: 1080, refresh_millihertz: 59_940 },
            VideoModeSpec { width: 1920, height: 1080, refresh_millihertz: 75_000 },
        ];
        assert_eq!(choose_video_mode(&modes, 1920, 1080, Some(60)), Some(0));
    }
}
