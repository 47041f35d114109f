use super::*;
use crate::foundation::core::Canvas;

fn fresh_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_png_sink").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn frame(w: u32, h: u32, rgb: [u8; 3]) -> FrameRgb {
    FrameRgb {
        width: w,
        height: h,
        data: rgb.repeat((w * h) as usize),
    }
}

#[test]
fn writes_zero_padded_contiguous_files() {
    let dir = fresh_dir("contiguous");
    let mut sink = PngSequenceSink::new(&dir);
    sink.begin(SinkConfig {
        canvas: Canvas::new(4, 3).unwrap(),
    })
    .unwrap();
    for i in 0..3 {
        sink.push_frame(FrameIndex(i), &frame(4, 3, [i as u8 * 50, 0, 0]))
            .unwrap();
    }
    sink.end().unwrap();

    assert_eq!(sink.frames_written(), 3);
    for name in ["0000.png", "0001.png", "0002.png"] {
        assert!(dir.join(name).is_file(), "missing {name}");
    }
    let img = image::open(dir.join("0002.png")).unwrap().to_rgb8();
    assert_eq!(img.dimensions(), (4, 3));
    assert_eq!(img.get_pixel(1, 1).0, [100, 0, 0]);
}

#[test]
fn custom_padding() {
    let sink = PngSequenceSink::new("out").with_padding(6);
    assert_eq!(sink.dir(), Path::new("out"));
    assert_eq!(
        sink.frame_path(FrameIndex(42)),
        PathBuf::from("out").join("000042.png")
    );
}

#[test]
fn rejects_out_of_order_and_wrong_size() {
    let dir = fresh_dir("ordering");
    let mut sink = PngSequenceSink::new(&dir);
    assert!(sink.push_frame(FrameIndex(0), &frame(2, 2, [0; 3])).is_err());

    sink.begin(SinkConfig {
        canvas: Canvas::new(2, 2).unwrap(),
    })
    .unwrap();
    assert!(sink.push_frame(FrameIndex(1), &frame(2, 2, [0; 3])).is_err());
    assert!(sink.push_frame(FrameIndex(0), &frame(3, 2, [0; 3])).is_err());
    assert!(sink.push_frame(FrameIndex(0), &frame(2, 2, [0; 3])).is_ok());
}

#[test]
fn unwritable_directory_fails_begin() {
    let dir = fresh_dir("blocked");
    std::fs::create_dir_all(dir.parent().unwrap()).unwrap();
    std::fs::write(&dir, b"not a directory").unwrap();
    let mut sink = PngSequenceSink::new(dir.join("frames"));
    let err = sink
        .begin(SinkConfig {
            canvas: Canvas::new(1, 1).unwrap(),
        })
        .unwrap_err();
    assert!(matches!(err, SplineCamError::Encode(_)));
    std::fs::remove_file(&dir).unwrap();
}
