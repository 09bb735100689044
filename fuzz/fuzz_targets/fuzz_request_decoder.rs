#![no_main]

use arbitrary::Arbitrary;
use http11_request_decoder::{DecoderLimits, RequestDecoder};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct FuzzInput {
    chunk_size: u8,
    data: Vec<u8>,
}

fuzz_target!(|input: FuzzInput| {
    // データを一度に feed
    let mut whole = RequestDecoder::with_limits(DecoderLimits::unlimited());
    let whole_result = whole.feed(&input.data);

    // データを分割して feed (ストリーミングシナリオ)
    let chunk_size = (input.chunk_size as usize).max(1);
    let mut chunked = RequestDecoder::with_limits(DecoderLimits::unlimited());
    let mut chunked_result = Ok(());
    for chunk in input.data.chunks(chunk_size) {
        if let Err(e) = chunked.feed(chunk) {
            chunked_result = Err(e);
            break;
        }
    }

    // 分割の仕方で結果が変わってはならない
    match (whole_result, chunked_result) {
        (Ok(_), Ok(())) => {
            assert_eq!(whole.state(), chunked.state());
            assert_eq!(whole.request(), chunked.request());
        }
        (Err(a), Err(b)) => assert_eq!(a, b),
        (a, b) => panic!("whole: {:?}, chunked: {:?}", a, b),
    }
});
