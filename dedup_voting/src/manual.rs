/*!

This is the long-form manual for `dedup_voting` and `dtally`.

## How votes are counted

Every response row carries a first name, a last name and an answer. The
names are trimmed and lower-cased, and together they identify the voter:
`Jane Doe`, `jane doe ` and ` JANE DOE` are the same person.

Rows are read in file order, and the later row of a voter always replaces
the earlier one, whatever it contains. A voter who first answered `Yes` and
then submitted an empty answer ends up with an empty vote. Form tools append
new submissions at the bottom of the export, which is why the file order is
taken as the submission order. No timestamp column is read: if the rows of
a file were sorted by something else, the wrong vote is kept.

Rows where the first or the last name is empty are counted as responses but
never as votes.

Once all the rows are read:
- an answer of exactly `yes` (after normalization) is a yes vote
- an answer of exactly `no` is a no vote
- anything else (blank, free text) still counts as a unique vote, for neither side

The percentages are computed against the unique votes and rounded to one
decimal place. The motion passes (`YES`) only if there are strictly more yes
votes than no votes. A tie, including the case with no votes at all, is `NO`.

## Input formats

* `xlsx` Excel workbook, as downloaded from Microsoft Forms or Google Forms
* `csv` Comma Separated Values

In both cases the first row is the header and is skipped. The columns are
selected by position, starting at 0 for column `A`. When reading a
workbook, the first worksheet is used unless a worksheet name is given.

## Configuration

Every option can be given on the command line. The same options can also be
stored in a JSON file passed with `--config`:

```text
{
  "outputSettings": {
    "contestName": "Name change",
    "outputPath": "vote_data.json"
  },
  "source": {
    "provider": "xlsx",
    "filePath": "Form Responses.xlsx",
    "firstNameColumnIndex": "G",
    "lastNameColumnIndex": "H",
    "voteColumnIndex": 9,
    "voteHeader": "Do you approve"
  }
}
```

Paths are relative to the directory of the configuration file. Column
indexes are either numbers (starting at 0) or column letters. The options
`firstNameHeader`, `lastNameHeader` and `voteHeader` are optional. When
present, the header of the corresponding column must contain this text
(case is ignored), otherwise the program stops before writing anything.
This catches forms whose questions were reordered.

## Output

The summary is written in JSON format:

```text
{
  "yes_count": 1,
  "no_count": 1,
  "total_unique_votes": 2,
  "total_raw_responses": 3,
  "duplicates_removed": 1,
  "yes_percentage": 50.0,
  "no_percentage": 50.0,
  "result": "NO"
}
```

`duplicates_removed` is the number of responses minus the number of unique
votes. It includes the rows without a full name.

*/
