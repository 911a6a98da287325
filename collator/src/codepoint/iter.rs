use std::collections::HashMap;

use super::CodepointWithData;

/// итератор по кодпоинтам фрагмента с данными о весах из индекса таблицы
pub struct CodepointsIter<'a>
{
    codes: &'a [u32],
    pos: usize,
    index: &'a HashMap<u32, u64>,
}

impl<'a> Iterator for CodepointsIter<'a>
{
    type Item = CodepointWithData;

    /// получаем кодпоинт с данными о нём
    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item>
    {
        let code = *self.codes.get(self.pos)?;
        self.pos += 1;

        Some(CodepointWithData {
            data: data_value(self.index, code),
            code,
        })
    }
}

impl<'a> CodepointsIter<'a>
{
    /// итератор по кодпоинтам, с данными о весах и последовательностях
    pub fn new(codes: &'a [u32], index: &'a HashMap<u32, u64>) -> Self
    {
        Self { codes, pos: 0, index }
    }

    /// кодпоинты, начиная с последнего полученного
    #[inline(always)]
    pub fn remaining(&self) -> &'a [u32]
    {
        &self.codes[self.pos.saturating_sub(1) ..]
    }

    /// пропустить count кодпоинтов (вошедших в сокращение / числовую последовательность)
    #[inline(always)]
    pub fn advance(&mut self, count: usize)
    {
        self.pos = (self.pos + count).min(self.codes.len());
    }
}

/// запись о кодпоинте
#[inline(always)]
pub fn data_value(index: &HashMap<u32, u64>, code: u32) -> u64
{
    index.get(&code).copied().unwrap_or_default()
}
